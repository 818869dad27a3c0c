//! Fact scrubbing for precedent texts.
//!
//! Rules run in a fixed order. The contextual rules near the end rewrite `[AMOUNT]` placeholders
//! produced a few steps earlier, so reordering the table changes results.

use regex::{Captures, Regex};

use crate::{Error, Result, normalize::SpaceNormalizer};

pub const AMOUNT: &str = "[AMOUNT]";
pub const CURRENCY: &str = "[CURRENCY]";
pub const PERCENT: &str = "[PERCENT]";
pub const TERM_DAYS: &str = "[TERM_DAYS]";
pub const VAT_RATE: &str = "[VAT_RATE]";
pub const VAT_MARKER: &str = "[VAT_MARKER]";
pub const CLAUSE_REF: &str = "[CLAUSE_REF]";

/// Every placeholder the anonymizer can emit.
pub const PLACEHOLDERS: [&str; 7] =
	[AMOUNT, CURRENCY, PERCENT, TERM_DAYS, VAT_RATE, VAT_MARKER, CLAUSE_REF];

const NUMBER_WORDS_RU: &str = "одного|один|двух|два|трех|трёх|три|четырех|четырёх|четыре|пяти|пять|\
	шести|шесть|семи|семь|восьми|восемь|девяти|девять|десяти|десять|пятнадцати|пятнадцать|\
	двадцати|двадцать|тридцати|тридцать|сорока|сорок|шестидесяти|шестьдесят|девяноста|девяносто";
const NUMBER_WORDS_EN: &str = "one|two|three|four|five|six|seven|eight|nine|ten|fifteen|twenty|\
	thirty|forty|forty-five|sixty|ninety";
const DAY_UNITS: &str = "банковских\\s+дней|рабочих\\s+дней|календарных\\s+дней|дней|дня|суток|\
	banking\\s+days|business\\s+days|calendar\\s+days|days|day";

/// One ordered substitution.
#[derive(Debug)]
pub struct Rule {
	pub name: &'static str,
	pattern: Regex,
	replacement: &'static str,
}
impl Rule {
	fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Result<Self> {
		let pattern = Regex::new(pattern).map_err(|source| Error::Rule { rule: name, source })?;

		Ok(Self { name, pattern, replacement })
	}

	/// Applies the rule and reports how many matches were rewritten.
	pub fn apply(&self, text: &str) -> (String, usize) {
		let mut count = 0;
		let out = self.pattern.replace_all(text, |caps: &Captures<'_>| {
			let mut dst = String::new();

			count += 1;

			caps.expand(self.replacement, &mut dst);

			dst
		});

		(out.into_owned(), count)
	}
}

#[derive(Debug)]
pub struct Anonymizer {
	rules: Vec<Rule>,
	recognized: Regex,
	spaces: SpaceNormalizer,
}
impl Anonymizer {
	pub fn new() -> Result<Self> {
		let rules = vec![
			Rule::new(
				"number_word_gloss",
				&format!(r"(?i)(\d)\s*\(\s*(?:{NUMBER_WORDS_RU}|{NUMBER_WORDS_EN})\s*\)\s*"),
				"${1} ",
			)?,
			Rule::new(
				"digit_gloss",
				&format!(r"(?i)\b(?:{NUMBER_WORDS_RU}|{NUMBER_WORDS_EN})\s*\(\s*(\d{{1,3}})\s*\)"),
				"${1}",
			)?,
			Rule::new(
				"vat_rate",
				r"(?i)\b(?:ндс|vat|sales\s+tax)\s*(?:в\s+размере\s+|at\s+the\s+rate\s+of\s+|at\s+|of\s+)?\d{1,2}(?:[.,]\d{1,2})?\s*%",
				VAT_RATE,
			)?,
			Rule::new("vat_marker", r"(?i)\b(?:ндс|vat|sales\s+tax)\b", VAT_MARKER)?,
			Rule::new(
				"currency_code",
				r"\b(?:USD|EUR|RUB|GBP|CNY|CHF|AED|KZT|UAH|PLN|TRY|JPY)\b",
				CURRENCY,
			)?,
			Rule::new(
				"currency_word",
				r"(?i)\b(?:доллар(?:ами|ах|ам|ов|ы|а)?(?:\s+сша)?|евро|руб(?:лями|лях|лям|лей|ля|лю|ль|ли)?|фунт(?:ами|ах|ов|а)?\s+стерлинг(?:ов)?|злот(?:ыми|ый|ых|ого|ым)|юан(?:ями|ях|ей|ь|я)|тенге|дирхам(?:ами|ах|ов|а)?|usd|eur|rub|gbp|cny|pln|kzt|aed|(?:us\s+)?dollars?|euros?|roubles?|rubles?|pounds?\s+sterling|zlotys?|yuan|tenge|dirhams?)\b",
				CURRENCY,
			)?,
			Rule::new(
				"currency_adjective",
				r"(?i)\b(?:польск|российск|американск|китайск|казахстанск|швейцарск|британск|polish|russian|american|chinese|swiss|british)\w*\s+\[CURRENCY\]",
				CURRENCY,
			)?,
			Rule::new("percent", r"\b\d{1,3}(?:[.,]\d{1,2})?\s*%", PERCENT)?,
			Rule::new(
				"term_days_digits",
				&format!(r"(?i)\b\d{{1,3}}\s*(?:(?:{DAY_UNITS})\b|(?:дн|сут)\b\.?)"),
				TERM_DAYS,
			)?,
			Rule::new(
				"term_days_words",
				&format!(r"(?i)\b(?:{NUMBER_WORDS_RU}|{NUMBER_WORDS_EN})\s+(?:{DAY_UNITS})\b"),
				TERM_DAYS,
			)?,
			Rule::new(
				"amount",
				r"\b(?:\d{1,3}(?:[ ,.\x{00A0}]\d{3})+(?:[.,]\d{1,2})?|\d{4,}(?:[.,]\d{1,2})?)\b",
				AMOUNT,
			)?,
			Rule::new(
				"amount_as_clause",
				r"(?i)\b(пункт[аеуы]?|п\.|раздел[аеуы]?|стать[еяи]|clause|section|article)\s+\[AMOUNT\]",
				"${1} [CLAUSE_REF]",
			)?,
			Rule::new(
				"amount_as_banking_days",
				r"(?i)\[AMOUNT\](\s+(?:банковских\s+дней|рабочих\s+дней|business\s+days|banking\s+days))",
				"[TERM_DAYS]${1}",
			)?,
			Rule::new(
				"amount_as_days",
				r#"(?i)[«"']?\[AMOUNT\][»"']?(\s+(?:календарн(?:ых|ые)\s+)?(?:дней|дня|суток|calendar\s+days|days))"#,
				"[TERM_DAYS]${1}",
			)?,
			Rule::new(
				"cross_reference",
				r"(?i),?\s*(?:(?:указанн|предусмотренн)\w*\s+(?:в\s+)?(?:пункте|п\.|разделе|статье)\s+(?:\[[A-Z_]+\]|\d+(?:\.\d+)*)\s+(?:настоящего|данного)\s+(?:контракт|договор)\w*|as\s+(?:specified|set\s+out|provided)\s+in\s+(?:clause|section|article)\s+(?:\[[A-Z_]+\]|\d+(?:\.\d+)*)\s+of\s+(?:this|the)\s+(?:contract|agreement))",
				"",
			)?,
		];
		let recognized = Regex::new(&format!(
			"(?:{})",
			PLACEHOLDERS.iter().map(|token| regex::escape(token)).collect::<Vec<_>>().join("|")
		))?;

		Ok(Self { rules, recognized, spaces: SpaceNormalizer::new()? })
	}

	/// Rewrites facts into placeholders, returning the text and the number of substitutions.
	pub fn anonymize(&self, text: &str) -> (String, usize) {
		let mut text = text.to_string();
		let mut replacements = 0;

		for rule in &self.rules {
			let (next, count) = rule.apply(&text);

			text = next;
			replacements += count;
		}

		(self.spaces.normalize(&text), replacements)
	}

	/// Removes placeholder tokens that arrive with the raw text.
	///
	/// Runs until no token is left, since removing one can join its neighbours into another.
	pub fn strip_placeholders(&self, text: &str) -> String {
		let mut text = text.to_string();

		while self.recognized.is_match(&text) {
			text = self.recognized.replace_all(&text, "").into_owned();
		}

		text
	}
}
