use regex::{Regex, RegexSet};

use crate::{
	ErrorKind, Result,
	form::PaymentForm,
	validate::{RepetitionDetector, Validator, chars_without_whitespace, count_matching_lines},
};
use lexdraft_config::SectionRules;

const BOILERPLATE: &[&str] = &[
	r"\bв\s+соответствии\s+с\s+действующ\w*\s+законодательств\w*",
	r"\bсторон[аы]\s+обяз(?:уется|уются)\b.*\bсоблюдат\w*",
	r"\bвправе\s+требоват\w*",
	r"\bвозможн(?:ые|ых)\s+последстви(?:я|й)\b",
	r"\bв\s+случае\s+неисполнени\w*\b.*\bубытк\w*",
	r"\bвозмещени\w*\s+убытк\w*",
	r"\bв\s+случае\s+возникновени\w*\s+спор\w*",
	r"\bвести\s+переговор\w*",
	r"\bin\s+accordance\s+with\s+(?:the\s+)?(?:applicable|current)\s+legislation\b",
	r"\bentitled\s+to\s+(?:claim|demand)\b",
	r"\bpossible\s+consequences\b",
	r"\bcompensation\s+(?:for|of)\s+(?:losses|damages)\b",
	r"\bin\s+the\s+event\s+of\s+(?:a\s+)?disputes?\b",
	r"\b(?:conduct|hold)\s+negotiations\b",
];

const OUT_OF_SCOPE: &[&str] = &[
	r"\bприменим(?:ое|ого)\s+прав[оа]\b",
	r"\bподсудност[ьи]\b",
	r"\bюрисдикци(?:я|и)\b",
	r"\bарбитражн(?:ый|ого)\s+суд",
	r"\bтретейск(?:ий|ого)\s+суд",
	r"\bсудебн(?:ый|ом)\s+поряд(?:ок|ке)\b",
	r"\bмест[оа]\s+рассмотрени[яе]\s+спор(?:ов|а)\b",
	r"\bфорс[- ]?мажор",
	r"\bнепреодолим(?:ая|ой)\s+сил[аы]\b",
	r"\bконфиденциал\w*",
	r"\bкоммерческ(?:ая|ой)\s+тайн[аы]\b",
	r"\bрасторжени[ея]\b",
	r"\bсрок\s+действия\b",
	r"\bпрекращени[ея]\b",
	r"\bраздел\s+уведомлени(?:я|й)\b",
	r"\bнастоящ(?:ие|ий)\s+уведомлени(?:я|е)\s+направля(?:ется|ются)\s+по\s+адрес(?:у|ам)\b",
	r"\bgoverning\s+law\b",
	r"\bjurisdiction\b",
	r"\barbitra(?:tion|l\s+tribunal)\b",
	r"\bcompetent\s+courts?\b",
	r"\bforce\s+majeure\b",
	r"\bconfidential\w*",
	r"\btrade\s+secrets?\b",
	r"\bterminat(?:e|ed|ion)\b",
	r"\bterm\s+of\s+(?:this|the)\s+(?:contract|agreement)\b",
	r"\bnotices?\s+(?:shall|must)\s+be\s+sent\b",
];

const PENALTY: &[&str] = &[
	r"\bпен(?:я|и|ю|ей|ями)\b",
	r"неустойк",
	r"штраф",
	r"санкц",
	r"\bпроцент\w*\s+за\s+просрочк",
	r"\bpenalt",
	r"\bdefault\s+interest\b",
	r"\blate\s+payment\s+(?:interest|charges?|fees?)\b",
	r"\bliquidated\s+damages\b",
];

const BANK_DETAILS: &[&str] = &[
	r"\bбанковск\w*\s+реквизит",
	r"\bр/с\b",
	r"\bк/с\b",
	r"\bкорр\.?\s*сч[её]т",
	r"\bкорреспондентск",
	r"\bбик\b",
	r"\bинн\b",
	r"\bкпп\b",
	r"\bогрн\b",
	r"\biban\b",
	r"\bswift\b",
	r"\bbic\b",
	r"\baccount\s+(?:no|number)\b",
	r"\bbank(?:ing)?\s+details\b",
	r"\bbank\s+code\b",
	r"\brouting\s+number\b",
	r"\bsort\s+code\b",
	r"\bbeneficiary\b",
	r"\d{12,}",
];

const DEBIT_DATE: &[&str] = &[
	r"\b(?:дат\w*|дн[её]м|момент\w*)\s+списани",
	r"\b(?:date|day|moment)\s+of\s+debit",
	r"\bdebited\s+from\b",
];

const CREDIT_DATE: &[&str] = &[
	r"\b(?:дат\w*|дн[её]м|момент\w*)\s+зачислени",
	r"\b(?:date|day|moment)\s+of\s+credit",
	r"\bcredited\s+to\b",
];

/// Party-name pairs that must not both appear in one section.
const PARTY_CONFLICTS: &[(&str, &str)] = &[
	("покупател", "заказчик"),
	("поставщик", "исполнител"),
	("покупател", "продав"),
	("buyer", "customer"),
	("supplier", "contractor"),
	("buyer", "seller"),
];

/// Checks a drafted payment-terms section.
///
/// Order: empty, length, subclause count, numbering format, placeholders, party terms,
/// repetition, boilerplate, foreign topics, penalties, bank details, payment date definition.
#[derive(Debug)]
pub struct PaymentTermsValidator {
	min_chars_no_spaces: usize,
	min_subclauses: usize,
	penalties_allowed: bool,
	bank_details_allowed: bool,
	subclause: Regex,
	simple_numbered: Regex,
	placeholder: Regex,
	party_conflicts: Vec<(Regex, Regex)>,
	repetition: RepetitionDetector,
	boilerplate: RegexSet,
	out_of_scope: RegexSet,
	penalty: RegexSet,
	bank_details: RegexSet,
	debit_date: RegexSet,
	credit_date: RegexSet,
}
impl PaymentTermsValidator {
	pub fn new(rules: &SectionRules, form: &PaymentForm) -> Result<Self> {
		let prefix = regex::escape(&rules.numbering_prefix);
		let party_conflicts = PARTY_CONFLICTS
			.iter()
			.map(|(left, right)| Ok((stem_regex(left)?, stem_regex(right)?)))
			.collect::<Result<Vec<_>>>()?;

		Ok(Self {
			min_chars_no_spaces: rules.min_chars_no_spaces as usize,
			min_subclauses: rules.min_subclauses as usize,
			penalties_allowed: form.late_payment_penalty_enabled,
			bank_details_allowed: form.bank_details_included,
			subclause: Regex::new(&format!(r"^{prefix}\.\d{{1,3}}\.\s+"))?,
			simple_numbered: Regex::new(r"^\d+\.\s+")?,
			placeholder: Regex::new(r"\[[A-Z_]+\]")?,
			party_conflicts,
			repetition: RepetitionDetector::new()?,
			boilerplate: case_insensitive_set(BOILERPLATE)?,
			out_of_scope: case_insensitive_set(OUT_OF_SCOPE)?,
			penalty: case_insensitive_set(PENALTY)?,
			bank_details: case_insensitive_set(BANK_DETAILS)?,
			debit_date: case_insensitive_set(DEBIT_DATE)?,
			credit_date: case_insensitive_set(CREDIT_DATE)?,
		})
	}

	fn has_mixed_party_terms(&self, text: &str) -> bool {
		self.party_conflicts
			.iter()
			.any(|(left, right)| left.is_match(text) && right.is_match(text))
	}
}
impl Validator for PaymentTermsValidator {
	fn validate(&self, text: &str) -> Result<(), ErrorKind> {
		let text = text.trim();

		if text.is_empty() {
			return Err(ErrorKind::EmptyOutput);
		}
		if chars_without_whitespace(text) < self.min_chars_no_spaces {
			return Err(ErrorKind::TooShort);
		}

		let good = count_matching_lines(text, &self.subclause);

		if good < self.min_subclauses {
			return Err(ErrorKind::TooFewListItems);
		}

		let simple = count_matching_lines(text, &self.simple_numbered);

		if good > 0 && simple >= (good / 2).max(2) {
			return Err(ErrorKind::WrongNumberingFormat);
		}
		if self.placeholder.is_match(text) {
			return Err(ErrorKind::ContainsPlaceholders);
		}
		if self.has_mixed_party_terms(text) {
			return Err(ErrorKind::MixedPartyTerms);
		}
		if self.repetition.detect(text) {
			return Err(ErrorKind::RepetitionDetected);
		}
		if self.boilerplate.is_match(text) {
			return Err(ErrorKind::ContainsBoilerplate);
		}
		if self.out_of_scope.is_match(text) {
			return Err(ErrorKind::ContainsOutOfScopeTopics);
		}
		if !self.penalties_allowed && self.penalty.is_match(text) {
			return Err(ErrorKind::ContainsPenalty);
		}
		if !self.bank_details_allowed && self.bank_details.is_match(text) {
			return Err(ErrorKind::ContainsBankDetails);
		}
		if self.debit_date.is_match(text) && self.credit_date.is_match(text) {
			return Err(ErrorKind::ConflictingPaymentDateDefinition);
		}

		Ok(())
	}
}

fn stem_regex(stem: &str) -> Result<Regex> {
	Ok(Regex::new(&format!(r"(?i)\b{}", regex::escape(stem)))?)
}

pub(crate) fn case_insensitive_set(patterns: &[&str]) -> Result<RegexSet> {
	Ok(RegexSet::new(patterns.iter().map(|pattern| format!("(?i){pattern}")))?)
}
