//! A small bilingual precedent corpus.

use serde_json::json;

#[derive(Clone, Copy, Debug)]
pub struct Row {
	pub doc_id: &'static str,
	pub title: &'static str,
	pub section_tag: &'static str,
	pub language: &'static str,
	pub text: &'static str,
}

pub const ROWS: [Row; 7] = [
	Row {
		doc_id: "c-001",
		title: "Условия оплаты",
		section_tag: "payment_terms",
		language: "ru",
		text: "Оплата производится Покупателем банковским переводом в течение 30 (тридцати) банковских дней с даты получения счета. Валюта платежа: доллары США. НДС 20% включен в цену. При просрочке оплаты начисляется пеня 0,1% за каждый день просрочки.",
	},
	Row {
		doc_id: "c-002",
		title: "Порядок расчетов",
		section_tag: "payment_terms",
		language: "ru",
		text: "Расчеты по договору осуществляются в рублях. Покупатель перечисляет аванс в размере 50% от суммы счета в течение 5 рабочих дней. Срок оплаты остатка составляет 10 дней после подписания акта. Банковские комиссии несет плательщик.",
	},
	Row {
		doc_id: "c-003",
		title: "Payment terms",
		section_tag: "payment_terms",
		language: "en",
		text: "The Buyer shall pay each invoice within thirty (30) days after receipt by bank transfer in USD. Payment is due without set-off. VAT at 20% is payable in addition. Late payment interest accrues at 8% per annum on the amount of 1,250,000.00.",
	},
	Row {
		doc_id: "c-010",
		title: "Условия поставки",
		section_tag: "delivery_terms",
		language: "ru",
		text: "Поставка осуществляется в течение 45 дней с даты подписания договора. Отгрузка производится партиями. Переход риска случайной гибели происходит в момент доставки на склад Покупателя. Упаковка и маркировка должны обеспечивать сохранность при перевозке.",
	},
	Row {
		doc_id: "c-011",
		title: "Delivery",
		section_tag: "",
		language: "en",
		text: "Delivery of the goods shall be made within 60 days. Partial delivery is allowed. Risk and title pass to the Buyer upon delivery to the carrier. Packaging and marking must be suitable for transport and storage.",
	},
	Row {
		doc_id: "c-020",
		title: "Предмет договора",
		section_tag: "subject",
		language: "ru",
		text: "Поставщик обязуется передать в собственность Покупателя товар согласно спецификации, ассортимент и количество которого определяются сторонами в приложениях к договору.",
	},
	Row {
		doc_id: "c-021",
		title: "Note",
		section_tag: "",
		language: "ru",
		text: "Короткая запись.",
	},
];

/// The corpus as JSON lines, using the legacy field names.
pub fn jsonl() -> String {
	ROWS.iter()
		.map(|row| {
			json!({
				"text": row.text,
				"contract_id": row.doc_id,
				"title": row.title,
				"section_group": "commercial",
				"section_id": row.section_tag,
				"language": row.language,
			})
			.to_string()
		})
		.collect::<Vec<_>>()
		.join("\n")
}
