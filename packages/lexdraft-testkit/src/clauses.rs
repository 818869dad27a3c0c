//! Drafted-section texts that pass every section check when numbered correctly.

pub const PAYMENT: [&str; 24] = [
	"The Buyer pays each invoice of the Supplier within thirty calendar days after receiving it.",
	"Payment is made by wire transfer in the currency stated in the specification.",
	"The payment date is the date on which the funds reach the account of the Supplier.",
	"The Supplier issues an invoice for each shipped batch on the day of its dispatch.",
	"Each invoice states the number of the contract, the batch and the amount due.",
	"The Buyer may pay an invoice earlier than the due date without any consent.",
	"Partial payment of an invoice is allowed only with the written consent of the Supplier.",
	"Transfer fees charged by the servicing institution of the Buyer are borne by the Buyer.",
	"Fees of intermediary institutions are borne by the Supplier unless agreed otherwise.",
	"Amounts due are paid in full without any set-off against counter demands.",
	"The Buyer may not withhold any part of an invoiced amount for any reason.",
	"If the due date falls on a weekend, payment is made on the next working day.",
	"Prices and amounts in invoices are stated exclusive of value added tax where applicable.",
	"The Supplier sends invoices to the address for correspondence named in the contract.",
	"An invoice that lacks mandatory details is returned to the Supplier within five days.",
	"The payment period for a corrected invoice starts on the day it is received.",
	"The Buyer indicates the invoice number in the purpose of each payment order.",
	"Currency conversion costs, if any, are borne by the party that initiates the conversion.",
	"Payments made by the Buyer are first applied to the oldest outstanding invoice.",
	"The parties reconcile mutual settlements once per quarter at the request of either of them.",
	"A reconciliation statement is signed by both parties within ten working days.",
	"Any overpayment is refunded to the Buyer or applied to the next invoice at its choice.",
	"Obligations to pay are fulfilled once the full amount is received by the Supplier.",
	"Changes to payment instructions take effect only after written confirmation by the Supplier.",
];

pub const DELIVERY: [&str; 24] = [
	"The Supplier delivers the goods within thirty calendar days after the contract takes effect.",
	"Delivery is made to the place of delivery named in the specification.",
	"Partial deliveries are allowed if agreed with the Buyer in advance.",
	"The Supplier notifies the Buyer of each shipment no later than two days before dispatch.",
	"The goods are packed in packaging that protects them during carriage and storage.",
	"Each package is marked with the contract number, the consignee and the gross weight.",
	"The risk of accidental loss passes to the Buyer at the moment of delivery.",
	"Title to the goods passes to the Buyer together with the risk of loss.",
	"The delivery date is the date stated in the transport document signed by the carrier.",
	"The Buyer takes delivery of the goods at the agreed point within the agreed hours.",
	"Acceptance of the goods by quantity takes place at the moment of delivery.",
	"Acceptance of the goods by quality takes place within ten days after delivery.",
	"Discrepancies found on acceptance are recorded in a report signed by both parties.",
	"The Supplier hands over the shipping documents together with each consignment.",
	"Early delivery is possible only with the prior written consent of the Buyer.",
	"The Supplier arranges carriage of the goods to the place of delivery at its own cost.",
	"Unloading at the place of delivery is carried out by the Buyer with its own equipment.",
	"Demurrage of vehicles caused by the Buyer is recorded in the waybill.",
	"The Supplier keeps the goods in storage free of charge for up to five days if the Buyer delays.",
	"The delivery schedule may be changed by a written agreement of the parties.",
	"Returnable packaging is sent back to the Supplier within fifteen days after unloading.",
	"The Supplier informs the Buyer without delay of any circumstances delaying a shipment.",
	"Goods delivered in excess of the agreed quantity may be refused by the Buyer.",
	"Incoterms rules apply only where the specification expressly refers to them.",
];

/// `count` payment subclauses numbered `{prefix}.1.` onwards, one per line.
pub fn payment_section(prefix: &str, count: usize) -> String {
	numbered(prefix, &PAYMENT, count)
}

/// `count` delivery subclauses numbered `{prefix}.1.` onwards, one per line.
pub fn delivery_section(prefix: &str, count: usize) -> String {
	numbered(prefix, &DELIVERY, count)
}

fn numbered(prefix: &str, clauses: &[&str], count: usize) -> String {
	clauses
		.iter()
		.take(count)
		.enumerate()
		.map(|(idx, clause)| format!("{prefix}.{}. {clause}", idx + 1))
		.collect::<Vec<_>>()
		.join("\n")
}
