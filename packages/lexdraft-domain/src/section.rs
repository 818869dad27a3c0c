use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{corpus::LanguageMode, form::FormInput};
use lexdraft_config::{SectionRules, Sections};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
	PaymentTerms,
	DeliveryTerms,
}
impl SectionKind {
	/// Drafting order inside a contract.
	pub const ORDERED: [Self; 2] = [Self::PaymentTerms, Self::DeliveryTerms];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::PaymentTerms => "payment_terms",
			Self::DeliveryTerms => "delivery_terms",
		}
	}

	pub fn parse(raw: &str) -> Option<Self> {
		Self::ORDERED.into_iter().find(|kind| kind.as_str() == raw.trim())
	}

	/// Heading used when the section is written into the assembled contract.
	pub fn heading(self) -> &'static str {
		match self {
			Self::PaymentTerms => "[PAYMENT_TERMS]",
			Self::DeliveryTerms => "[DELIVERY_TERMS]",
		}
	}

	pub fn rules(self, sections: &Sections) -> &SectionRules {
		match self {
			Self::PaymentTerms => &sections.payment_terms,
			Self::DeliveryTerms => &sections.delivery_terms,
		}
	}

	pub fn profile(self) -> &'static SectionProfile {
		match self {
			Self::PaymentTerms => &PAYMENT_TERMS,
			Self::DeliveryTerms => &DELIVERY_TERMS,
		}
	}
}
impl fmt::Display for SectionKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Immutable per-section retrieval data.
///
/// Keywords are lowercase substrings. A record is relevant when it hits at least
/// `min_positive` positive keywords, unless it also hits `negative_cutoff` or more negative
/// keywords without reaching `strong_positive`.
#[derive(Debug)]
pub struct SectionProfile {
	pub kind: SectionKind,
	pub positive: &'static [&'static str],
	pub negative: &'static [&'static str],
	pub min_positive: usize,
	pub negative_cutoff: usize,
	pub strong_positive: usize,
	/// Records carrying this section tag are admitted ahead of keyword-filtered ones.
	pub preferred_section_tag: Option<&'static str>,
}
impl SectionProfile {
	/// Builds the keyword query for a drafting request.
	///
	/// Bilingual requests search with both term lists.
	pub fn query(&self, form: &FormInput) -> String {
		let mut terms: Vec<&str> = Vec::new();

		match form.language_mode {
			LanguageMode::Ru => self.push_terms(LanguageMode::Ru, form, &mut terms),
			LanguageMode::En => self.push_terms(LanguageMode::En, form, &mut terms),
			LanguageMode::Bilingual => {
				self.push_terms(LanguageMode::Ru, form, &mut terms);
				self.push_terms(LanguageMode::En, form, &mut terms);
			},
		}

		terms.join(" ")
	}

	fn push_terms(&self, language: LanguageMode, form: &FormInput, terms: &mut Vec<&str>) {
		match (self.kind, language) {
			(SectionKind::PaymentTerms, LanguageMode::En) => {
				terms.extend(PAYMENT_QUERY_EN);

				if form.payment.prepayment_required {
					terms.push("advance payment");
				}
				if form.payment.late_payment_penalty_enabled {
					terms.push("penalty interest");
				}
			},
			(SectionKind::PaymentTerms, _) => {
				terms.extend(PAYMENT_QUERY_RU);

				if form.payment.prepayment_required {
					terms.push("аванс");
				}
				if form.payment.late_payment_penalty_enabled {
					terms.push("неустойка пеня проценты");
				}
			},
			(SectionKind::DeliveryTerms, LanguageMode::En) => terms.extend(DELIVERY_QUERY_EN),
			(SectionKind::DeliveryTerms, _) => terms.extend(DELIVERY_QUERY_RU),
		}
	}
}

static PAYMENT_TERMS: SectionProfile = SectionProfile {
	kind: SectionKind::PaymentTerms,
	positive: &[
		"оплата", "платеж", "платёж", "счет", "счёт", "инвойс", "предоплата", "аванс",
		"отсрочка", "расчет", "расчёт", "расчеты", "расчёты", "срок", "банков", "ндс", "комис",
		"неустойк", "пеня", "процент", "просроч", "payment", "invoice", "due", "payable",
		"prepayment", "advance", "bank", "transfer", "vat", "interest", "penalty", "setoff",
		"set-off",
	],
	negative: &[
		"поставщик обязуется",
		"передать в собственность",
		"номенклатур",
		"ассортимент",
		"техническ",
		"спецификац",
		"предмет договора",
		"поставка товара осуществляется",
		"продукци",
		"оборудовани",
		"товар",
		"работ",
		"услуг",
		"комплект",
		"acceptance",
		"приемк",
		"приёмк",
		"качество",
		"количество",
	],
	min_positive: 4,
	negative_cutoff: 3,
	strong_positive: 7,
	preferred_section_tag: None,
};

static DELIVERY_TERMS: SectionProfile = SectionProfile {
	kind: SectionKind::DeliveryTerms,
	positive: &[
		"поставка", "доставка", "отгруз", "срок постав", "срок достав", "место постав",
		"место достав", "переход риск", "риск случайной", "инкотерм", "incoterms", "склад",
		"перевоз", "транспорт", "упаков", "маркир", "приемк", "приёмк", "акт прием", "накладн",
		"товаротранспорт", "частичн", "партиями", "график", "задержк", "просрочк", "хранен",
		"демерредж", "простой", "delivery", "dispatch", "shipment", "shipping", "lead time",
		"delivery date", "delivery point", "risk", "title", "packing", "packaging", "marking",
		"carrier", "transport", "acceptance", "take delivery", "demurrage", "storage",
		"partial delivery", "instalments", "schedule",
	],
	negative: &[
		"оплата", "платеж", "счет", "инвойс", "проценты", "пеня", "неустойк", "штраф",
		"payment", "invoice", "interest", "penalty", "late payment", "арбитраж", "суд",
		"претенз", "спор", "jurisdiction", "governing law", "liability", "damages", "убытк",
		"ответственност",
	],
	min_positive: 4,
	negative_cutoff: 3,
	strong_positive: 7,
	preferred_section_tag: Some("delivery_terms"),
};

const PAYMENT_QUERY_EN: [&str; 9] = [
	"payment terms",
	"invoice",
	"due date",
	"bank transfer",
	"currency",
	"without set-off",
	"VAT",
	"late payment interest",
	"prepayment",
];
const PAYMENT_QUERY_RU: [&str; 10] = [
	"условия оплаты",
	"порядок расчетов",
	"счет",
	"срок оплаты",
	"валюта платежа",
	"банковский перевод",
	"без зачета",
	"ндс",
	"проценты за просрочку",
	"предоплата",
];
const DELIVERY_QUERY_EN: [&str; 13] = [
	"delivery terms",
	"delivery date",
	"delivery point",
	"shipment",
	"dispatch",
	"partial deliveries",
	"incoterms",
	"risk of loss",
	"packaging",
	"acceptance",
	"take delivery",
	"storage",
	"demurrage",
];
const DELIVERY_QUERY_RU: [&str; 15] = [
	"условия поставки",
	"доставка",
	"срок поставки",
	"место поставки",
	"отгрузка",
	"перевозка",
	"инкотермс",
	"переход рисков",
	"упаковка",
	"маркировка",
	"приемка",
	"частичная поставка",
	"хранение",
	"простой",
	"демерредж",
];

#[cfg(test)]
mod tests {
	use super::*;
	use crate::form::PaymentForm;

	#[test]
	fn payment_query_reflects_flags() {
		let form = FormInput {
			language_mode: LanguageMode::En,
			payment: PaymentForm {
				prepayment_required: true,
				late_payment_penalty_enabled: true,
				..Default::default()
			},
			..Default::default()
		};
		let query = SectionKind::PaymentTerms.profile().query(&form);

		assert!(query.starts_with("payment terms invoice due date"));
		assert!(query.ends_with("prepayment advance payment penalty interest"));
	}

	#[test]
	fn russian_payment_query_without_flags() {
		let query = SectionKind::PaymentTerms.profile().query(&FormInput::default());

		assert!(query.starts_with("условия оплаты"));
		assert!(query.ends_with("предоплата"));
		assert!(!query.contains("аванс"));
	}

	#[test]
	fn bilingual_query_uses_both_lists() {
		let form = FormInput { language_mode: LanguageMode::Bilingual, ..Default::default() };
		let query = SectionKind::DeliveryTerms.profile().query(&form);

		assert!(query.contains("срок поставки"));
		assert!(query.contains("delivery date"));
	}

	#[test]
	fn only_delivery_prefers_tagged_records() {
		assert_eq!(SectionKind::PaymentTerms.profile().preferred_section_tag, None);
		assert_eq!(SectionKind::DeliveryTerms.profile().preferred_section_tag, Some("delivery_terms"));
	}
}
