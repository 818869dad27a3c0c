//! Bilingual prompts for the drafted sections.
//!
//! English wording is used for `en` requests. Russian wording serves `ru` and `bilingual` ones.

mod delivery;
mod payment;

use std::collections::HashSet;

use lexdraft_config::{SectionRules, Sections};
use lexdraft_domain::{ErrorKind, FormInput, LanguageMode, SectionKind};
use lexdraft_sanitizer::{normalize::SpaceNormalizer, truncate::split_sentences};
use lexdraft_service::{Prompt, PromptBuilder, RetryInstruction};

const MAX_SNIPPETS: usize = 6;
const SNIPPET_MIN_CHARS: usize = 60;
/// The upper end of the requested subclause range is this far above the minimum.
const SUBCLAUSE_SPREAD: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lang {
	Ru,
	En,
}
impl Lang {
	fn pick(self, ru: &'static str, en: &'static str) -> &'static str {
		match self {
			Self::Ru => ru,
			Self::En => en,
		}
	}

	fn labels(self) -> &'static Labels {
		match self {
			Self::Ru => &LABELS_RU,
			Self::En => &LABELS_EN,
		}
	}
}
impl From<LanguageMode> for Lang {
	fn from(mode: LanguageMode) -> Self {
		match mode {
			LanguageMode::En => Self::En,
			LanguageMode::Ru | LanguageMode::Bilingual => Self::Ru,
		}
	}
}

struct Labels {
	mandatory: &'static str,
	params: &'static str,
	party_terms: &'static str,
	structure: &'static str,
	topic_plan: &'static str,
	forbidden: &'static str,
	snippets: &'static str,
	constraints: &'static str,
	only_text: &'static str,
	write_lang: &'static str,
	no_snippets: &'static str,
}

const LABELS_RU: Labels = Labels {
	mandatory: "ОБЯЗАТЕЛЬНЫЕ ТРЕБОВАНИЯ К СТРУКТУРЕ:",
	params: "Параметры (обязательно соблюдай):",
	party_terms: "Термины сторон (обязательно соблюдай):",
	structure: "Структурные требования (обязательно соблюдай):",
	topic_plan: "План тем (обязательно соблюдай):",
	forbidden: "Запрещённые темы (обязательно соблюдай):",
	snippets: "Фразы-ориентиры (ТОЛЬКО стиль/формулировки, не факты):",
	constraints: "Ограничения:",
	only_text: "Сгенерируй ТОЛЬКО текст раздела (без заголовка).",
	write_lang: "Пиши на русском.",
	no_snippets: "- (нет)",
};
const LABELS_EN: Labels = Labels {
	mandatory: "MANDATORY STRUCTURE REQUIREMENTS:",
	params: "Parameters (must follow):",
	party_terms: "Party terms (must follow consistently):",
	structure: "Structural requirements (must follow):",
	topic_plan: "Topic plan (must cover, no repetition):",
	forbidden: "Forbidden topics (do NOT mention):",
	snippets: "Stylistic hints (style only, not facts):",
	constraints: "Constraints:",
	only_text: "Generate ONLY the section text (without a heading).",
	write_lang: "Write in English.",
	no_snippets: "- (none)",
};

/// The section-specific parts of a user prompt.
struct Brief {
	intro: &'static str,
	params: Vec<String>,
	structure_note: Option<&'static str>,
	topics: Vec<String>,
	forbidden: &'static [&'static str],
	constraints: Vec<String>,
	snippets: Vec<String>,
}

/// Builds both section prompts for one form.
#[derive(Debug)]
pub struct ContractPrompts {
	sections: Sections,
	spaces: SpaceNormalizer,
	payment_retry: SectionRetry,
	delivery_retry: SectionRetry,
}
impl ContractPrompts {
	/// `language` selects the wording of retry instructions.
	pub fn new(language: LanguageMode, sections: &Sections) -> lexdraft_sanitizer::Result<Self> {
		let lang = Lang::from(language);

		Ok(Self {
			payment_retry: SectionRetry::new(
				SectionKind::PaymentTerms,
				lang,
				&sections.payment_terms,
			),
			delivery_retry: SectionRetry::new(
				SectionKind::DeliveryTerms,
				lang,
				&sections.delivery_terms,
			),
			sections: sections.clone(),
			spaces: SpaceNormalizer::new()?,
		})
	}

	fn render(&self, lang: Lang, brief: &Brief, rules: &SectionRules) -> String {
		let labels = lang.labels();
		let prefix = &rules.numbering_prefix;
		let min = rules.min_subclauses;
		let max = min + SUBCLAUSE_SPREAD;
		let format = format!("{prefix}.1., {prefix}.2., {prefix}.3., ...");
		let mut blocks = vec![brief.intro.to_string()];

		blocks.push(block(labels.mandatory, match lang {
			Lang::En => vec![
				format!("- The section MUST contain AT LEAST {min} numbered subclauses."),
				format!("- Format: strictly {format}"),
				"- Each subclause must be on a new line.".to_string(),
				"- Each subclause must be a complete legal sentence.".to_string(),
				"- Do NOT merge multiple conditions into one subclause.".to_string(),
				"- If in doubt, add additional subclauses.".to_string(),
			],
			Lang::Ru => vec![
				format!("- Раздел ДОЛЖЕН содержать НЕ МЕНЕЕ {min} подпунктов."),
				format!("- Формат подпунктов: строго {format}"),
				"- Каждый подпункт с новой строки.".to_string(),
				"- Каждый подпункт это одно законченное юридическое предложение.".to_string(),
				"- НЕЛЬЗЯ объединять несколько условий в один подпункт.".to_string(),
				"- Если сомневаешься, добавь дополнительные подпункты.".to_string(),
			],
		}));
		blocks.push(block(labels.params, brief.params.iter().map(|param| format!("- {param}"))));
		blocks.push(block(labels.party_terms, party_terms(lang).iter().map(|line| format!("- {line}"))));

		let mut structure = match lang {
			Lang::En => vec![
				"Section structure:".to_string(),
				format!("- {min}-{max} numbered subclauses."),
				format!("- Format: strictly {format} (each on a new line)."),
				"- Each subclause must be a complete legal sentence.".to_string(),
				"- Do not repeat subclauses (no semantic duplicates).".to_string(),
			],
			Lang::Ru => vec![
				"Структура раздела:".to_string(),
				format!("- {min}-{max} подпунктов."),
				format!("- Формат: строго {format} (каждый с новой строки)."),
				"- Каждый подпункт это одно законченное юридическое предложение.".to_string(),
				"- Не повторяй подпункты (никаких смысловых дублей).".to_string(),
			],
		};

		if let Some(note) = brief.structure_note {
			structure.push(format!("- {note}"));
		}

		blocks.push(block(labels.structure, structure));

		let mut topics = vec![
			lang.pick(
				"Разрешённые темы (покрой все; 1 тема = 1 подпункт, без повторов):",
				"Allowed topics (cover all; 1 topic = 1 subclause, no repetition):",
			)
			.to_string(),
		];

		topics.extend(brief.topics.iter().enumerate().map(|(idx, topic)| format!("{}) {topic}", idx + 1)));
		topics.push(match lang {
			Lang::En => format!(
				"If you need {min}-{max} items: split the above procedures into smaller steps WITHOUT introducing new contract sections."
			),
			Lang::Ru => format!(
				"Если нужно {min}-{max} подпунктов: дроби процедуры на шаги, НЕ добавляя новые разделы договора."
			),
		});
		blocks.push(block(labels.topic_plan, topics));

		let mut forbidden = vec![
			lang.pick(
				"Запрещено упоминать (это другие секции договора):",
				"Do NOT mention (these belong to other contract sections):",
			)
			.to_string(),
		];

		forbidden.extend(brief.forbidden.iter().map(|topic| format!("- {topic}")));
		blocks.push(block(labels.forbidden, forbidden));

		if brief.snippets.is_empty() {
			blocks.push(block(labels.snippets, [labels.no_snippets.to_string()]));
		} else {
			blocks.push(block(labels.snippets, brief.snippets.iter().map(|s| format!("- {s}"))));
		}

		blocks.push(block(labels.constraints, brief.constraints.iter().map(|c| format!("- {c}"))));
		blocks.push(format!("{}\n{}", labels.only_text, labels.write_lang));

		self.spaces.normalize(&blocks.join("\n\n"))
	}
}
impl PromptBuilder for ContractPrompts {
	fn build(&self, section: SectionKind, form: &FormInput, precedents: &[String]) -> Prompt {
		let lang = Lang::from(form.language_mode);
		let rules = section.rules(&self.sections);
		let (system, brief) = match section {
			SectionKind::PaymentTerms =>
				(payment::system(lang), payment::brief(lang, &form.payment, precedents)),
			SectionKind::DeliveryTerms =>
				(delivery::system(lang), delivery::brief(lang, &form.delivery, precedents)),
		};

		Prompt { system: system.to_string(), user: self.render(lang, &brief, rules) }
	}

	fn retry_instruction(&self, section: SectionKind) -> &dyn RetryInstruction {
		match section {
			SectionKind::PaymentTerms => &self.payment_retry,
			SectionKind::DeliveryTerms => &self.delivery_retry,
		}
	}
}

/// Names the deficiency of the previous attempt, then restates what a passing draft needs.
#[derive(Clone, Debug)]
pub struct SectionRetry {
	section: SectionKind,
	lang: Lang,
	prefix: String,
	min_items: u32,
}
impl SectionRetry {
	pub fn new(section: SectionKind, lang: Lang, rules: &SectionRules) -> Self {
		Self {
			section,
			lang,
			prefix: rules.numbering_prefix.clone(),
			min_items: rules.min_subclauses,
		}
	}
}
impl RetryInstruction for SectionRetry {
	fn instruction(&self, kind: ErrorKind) -> String {
		let lead = match kind {
			ErrorKind::EmptyOutput =>
				self.lang.pick("Предыдущий ответ был пустым.", "The previous answer was empty."),
			ErrorKind::TooShort => self.lang.pick(
				"Предыдущий вариант оказался слишком коротким.",
				"The previous draft was too short.",
			),
			ErrorKind::TooFewListItems => self.lang.pick(
				"В предыдущем варианте слишком мало нумерованных подпунктов.",
				"The previous draft had too few numbered subclauses.",
			),
			ErrorKind::RepetitionDetected => self.lang.pick(
				"В предыдущем варианте есть повторяющиеся подпункты.",
				"The previous draft repeated the same subclauses.",
			),
			_ => self.lang.pick(
				"Предыдущий вариант не прошёл автоматическую проверку.",
				"The previous draft failed validation.",
			),
		};
		let body = match self.section {
			SectionKind::PaymentTerms => payment::retry(self.lang, &self.prefix, self.min_items),
			SectionKind::DeliveryTerms => delivery::retry(self.lang, &self.prefix, self.min_items),
		};

		format!("{lead} {body}")
	}
}

fn party_terms(lang: Lang) -> [&'static str; 2] {
	match lang {
		Lang::En => [
			"Use party terms consistently across the entire section: \"Buyer\" and \"Supplier\".",
			"Do NOT mix party labels such as \"Customer\", \"Seller\", \"Contractor\" if you already use \"Buyer/Supplier\".",
		],
		Lang::Ru => [
			"Используй термины Сторон единообразно по всему тексту: «Покупатель» и «Поставщик».",
			"НЕ используй в этой секции термины «Заказчик», «Исполнитель», «Продавец», если уже используешь «Покупатель/Поставщик».",
		],
	}
}

fn block<I>(title: &str, lines: I) -> String
where
	I: IntoIterator<Item = String>,
{
	let mut out = title.to_string();

	for line in lines {
		out.push('\n');
		out.push_str(&line);
	}

	out
}

/// Picks short precedent sentences that show wording for the section.
///
/// Sentences carrying placeholders, outside `SNIPPET_MIN_CHARS..=max_chars`, or without any of
/// `keywords` are skipped. Case-insensitive duplicates are kept once.
pub fn pick_snippets(precedents: &[String], keywords: &[&str], max_chars: usize) -> Vec<String> {
	let mut seen = HashSet::new();
	let mut snippets = Vec::new();

	for precedent in precedents {
		let flat = precedent.split_whitespace().collect::<Vec<_>>().join(" ");

		for sentence in split_sentences(&flat) {
			if sentence.contains(['[', ']']) {
				continue;
			}

			let chars = sentence.chars().count();

			if !(SNIPPET_MIN_CHARS..=max_chars).contains(&chars) {
				continue;
			}

			let lower = sentence.to_lowercase();

			if !keywords.iter().any(|keyword| lower.contains(keyword)) || !seen.insert(lower) {
				continue;
			}

			snippets.push(sentence.to_string());

			if snippets.len() >= MAX_SNIPPETS {
				return snippets;
			}
		}
	}

	snippets
}

fn yes_no(value: bool, yes: &'static str, no: &'static str) -> &'static str {
	if value { yes } else { no }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn snippets_skip_placeholders_and_short_sentences() {
		let precedents = vec![
			"Оплата производится в течение [TERM_DAYS] с даты счета. Счет оплачивается. Покупатель производит оплату безналичным переводом на расчетный счет Поставщика после получения счета.".to_string(),
			"ПОКУПАТЕЛЬ ПРОИЗВОДИТ ОПЛАТУ БЕЗНАЛИЧНЫМ ПЕРЕВОДОМ НА РАСЧЕТНЫЙ СЧЕТ ПОСТАВЩИКА ПОСЛЕ ПОЛУЧЕНИЯ СЧЕТА.".to_string(),
		];
		let snippets = pick_snippets(&precedents, &["оплат"], 240);

		assert_eq!(snippets, vec![
			"Покупатель производит оплату безналичным переводом на расчетный счет Поставщика после получения счета."
				.to_string()
		]);
	}

	#[test]
	fn snippets_are_capped() {
		let sentence = "The Buyer shall settle every invoice by bank transfer within the agreed period";
		let precedents = (0..10).map(|idx| format!("{sentence} number {idx}.")).collect::<Vec<_>>();

		assert_eq!(pick_snippets(&precedents, &["invoice"], 240).len(), MAX_SNIPPETS);
	}

	#[test]
	fn bilingual_requests_use_russian_wording() {
		assert_eq!(Lang::from(LanguageMode::Bilingual), Lang::Ru);
		assert_eq!(Lang::from(LanguageMode::En), Lang::En);
	}

	#[test]
	fn retry_instruction_names_the_deficiency() {
		let sections = Sections::default();
		let retry = SectionRetry::new(SectionKind::DeliveryTerms, Lang::En, &sections.delivery_terms);
		let instruction = retry.instruction(ErrorKind::TooFewListItems);

		assert!(instruction.starts_with("The previous draft had too few numbered subclauses."));
		assert!(instruction.contains("AT LEAST 20 subclauses formatted strictly as 2.1., 2.2."));
		assert_ne!(instruction, retry.instruction(ErrorKind::TooShort));
	}
}
