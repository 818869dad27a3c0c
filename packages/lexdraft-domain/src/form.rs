//! Typed drafting parameters.
//!
//! The form arrives as loose JSON. Defaults are applied here, once, so section generators
//! only ever see complete parameter sets.

use serde::{Deserialize, Serialize};

use crate::corpus::LanguageMode;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FormInput {
	#[serde(default)]
	pub language_mode: LanguageMode,
	#[serde(default)]
	pub payment: PaymentForm,
	#[serde(default)]
	pub delivery: DeliveryForm,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentForm {
	/// Event the payment period counts from, e.g. "invoice_date" or "delivery_date".
	pub payment_trigger: String,
	pub payment_term_days: u32,
	pub prepayment_required: bool,
	pub bank_details_included: bool,
	pub withholding_allowed: bool,
	pub suspension_right: bool,
	/// "payer", "beneficiary", or "shared".
	pub bank_charges: String,
	pub vat_mode: String,
	pub late_payment_penalty_enabled: bool,
}
impl Default for PaymentForm {
	fn default() -> Self {
		Self {
			payment_trigger: "invoice_date".to_string(),
			payment_term_days: 30,
			prepayment_required: false,
			bank_details_included: false,
			withholding_allowed: false,
			suspension_right: false,
			bank_charges: "payer".to_string(),
			vat_mode: "exclusive_if_any".to_string(),
			late_payment_penalty_enabled: false,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryForm {
	pub delivery_term_days: u32,
	pub delivery_date_type: String,
	pub partial_shipments_allowed: bool,
	/// Empty means "the agreed place of delivery".
	pub delivery_place: String,
	pub incoterms: String,
	pub risk_transfer: String,
	pub acceptance_document: String,
	pub packaging_required: bool,
}
impl Default for DeliveryForm {
	fn default() -> Self {
		Self {
			delivery_term_days: 30,
			delivery_date_type: "within_days_from_effective".to_string(),
			partial_shipments_allowed: true,
			delivery_place: String::new(),
			incoterms: String::new(),
			risk_transfer: "upon_delivery".to_string(),
			acceptance_document: String::new(),
			packaging_required: true,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_form_gets_defaults() {
		let form: FormInput = serde_json::from_str(
			r#"{"language_mode":"en","payment":{"prepayment_required":true}}"#,
		)
		.expect("Failed to parse form.");

		assert_eq!(form.language_mode, LanguageMode::En);
		assert!(form.payment.prepayment_required);
		assert_eq!(form.payment.payment_term_days, 30);
		assert_eq!(form.payment.bank_charges, "payer");
		assert!(form.delivery.partial_shipments_allowed);
	}

	#[test]
	fn empty_form_is_russian() {
		let form: FormInput = serde_json::from_str("{}").expect("Failed to parse form.");

		assert_eq!(form.language_mode, LanguageMode::Ru);
		assert_eq!(form, FormInput::default());
	}
}
