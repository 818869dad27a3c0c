use super::{Brief, Lang, pick_snippets, yes_no};
use lexdraft_domain::PaymentForm;

const SNIPPET_MAX_CHARS: usize = 240;
const SNIPPET_KEYWORDS: &[&str] = &[
	"оплат", "платеж", "платёж", "счет", "счёт", "инвойс", "дата оплаты", "датой оплаты",
	"банковск", "комисси", "ндс", "предоплат", "аванс", "удержан", "приостанов", "пен",
	"неустойк", "штраф", "процент", "просроч", "invoice", "vat", "withholding", "suspension",
	"payment", "due", "payable", "bank", "transfer", "interest", "penalty", "setoff", "set-off",
	"prepayment", "advance",
];
const FORBIDDEN_EN: [&str; 4] = [
	"Disputes, court/arbitration, claims procedures.",
	"Notices as a separate section/mechanism.",
	"General liability/remedies/indemnities.",
	"Changing bank details procedure (especially when bank details are not included).",
];
const FORBIDDEN_RU: [&str; 4] = [
	"Споры/арбитраж/суд/претензии/претензионный порядок/переговоры.",
	"Уведомления как отдельный порядок (notices).",
	"Убытки/возмещение убытков/общая ответственность (liability/remedies).",
	"Изменение банковских реквизитов/обязанность сообщать реквизиты (особенно если реквизиты не включаются в договор).",
];

pub(super) fn system(lang: Lang) -> &'static str {
	lang.pick(
		"Ты аккуратный юридический ассистент. Строго следуй параметрам и ограничениям из запроса пользователя. Пиши формально-деловым стилем. Не выдумывай факты. Не копируй реквизиты, суммы, валюты, ставки, страны и номера пунктов из прецедентов.",
		"You are a careful legal drafting assistant. Strictly follow the user parameters and constraints. Write in a formal legal style. Do not invent facts. Do not copy amounts, currencies, rates, countries, company names, clause numbers, or bank details from precedents.",
	)
}

pub(super) fn retry(lang: Lang, prefix: &str, min_items: u32) -> String {
	match lang {
		Lang::En => format!(
			"You MUST output AT LEAST {min_items} subclauses formatted strictly as {prefix}.1., {prefix}.2., ... each on a new line. DO NOT rewrite existing subclauses; add new ones without repetition. Every new subclause must add a distinct aspect within Payment Terms only. Do not include bank details if they are not allowed by the form. Avoid repeating the same clause opening more than twice. Keep a formal legal style and increase the content without duplicates."
		),
		Lang::Ru => format!(
			"Нужно НЕ МЕНЕЕ {min_items} подпунктов формата {prefix}.1., {prefix}.2., ... каждый с новой строки. ВАЖНО: не переписывай и не повторяй уже написанные подпункты. Каждый новый подпункт должен добавлять новый аспект и оставаться в рамках условий оплаты. Не добавляй банковские реквизиты, если это запрещено формой. Соблюдай юридический стиль и увеличь объём без повторов."
		),
	}
}

pub(super) fn brief(lang: Lang, form: &PaymentForm, precedents: &[String]) -> Brief {
	let trigger = trigger_phrase(lang, &form.payment_trigger);
	let charges = bank_charges_phrase(lang, &form.bank_charges);
	let vat = vat_mode_phrase(lang, &form.vat_mode);
	let days = form.payment_term_days;
	let snippets = pick_snippets(precedents, SNIPPET_KEYWORDS, SNIPPET_MAX_CHARS);

	match lang {
		Lang::En => Brief {
			intro: "You are a legal assistant. Generate the contract section \"Payment Terms\".",
			params: vec![
				format!("Payment term: {days} days {trigger}."),
				format!("Prepayment: {}.", yes_no(form.prepayment_required, "required", "not required")),
				format!(
					"Withholding / set-off: {}.",
					yes_no(form.withholding_allowed, "allowed", "not allowed unless otherwise agreed")
				),
				format!(
					"Suspension right upon late payment: {}.",
					yes_no(form.suspension_right, "enabled", "not granted")
				),
				format!("Bank charges: {charges}."),
				format!("VAT: {vat}."),
				format!(
					"Late payment penalty/interest: {}.",
					yes_no(form.late_payment_penalty_enabled, "include", "do not include")
				),
				format!(
					"Bank details included in contract: {}.",
					yes_no(form.bank_details_included, "yes", "no")
				),
			],
			structure_note: Some(
				"Each clause must start with a different grammatical construction wherever reasonably possible.",
			),
			topics: vec![
				"Basis for payment (invoice).".to_string(),
				format!("Payment term: {days} days {trigger}."),
				"Definition of payment date (choose ONE: debit from Buyer OR credit to Supplier, not both).".to_string(),
				"Payment method (bank transfer / cashless).".to_string(),
				format!("Prepayment: {}.", yes_no(form.prepayment_required, "required", "not required")),
				format!(
					"Withholding/set-off: {}.",
					yes_no(form.withholding_allowed, "allowed", "not allowed unless agreed")
				),
				format!("Bank charges: {charges}."),
				format!("VAT: {vat}."),
				"Invoicing format (electronic copies allowed; generic).".to_string(),
				"Invoice issuance timing (generic; no numbers from precedents).".to_string(),
				"Supporting documents evidencing delivery/acceptance for payment (generic).".to_string(),
				"Reconciliation statement possibility (act of reconciliation).".to_string(),
				"Procedure for correcting an invoice (credit note/corrective invoice), generic.".to_string(),
				"Overpayment handling (set-off/refund), generic.".to_string(),
				"Payment for partial deliveries (if applicable), generic.".to_string(),
				"Currency clause (generic; no currency codes unless provided in form).".to_string(),
				"Prohibition/allowance of deductions (restate once; avoid duplicates).".to_string(),
				"Suspension right upon late payment (only if enabled).".to_string(),
				"Disputed amounts handling (only payment mechanics, no disputes section).".to_string(),
				"Record-keeping / confirmations of payment (generic).".to_string(),
			],
			forbidden: &FORBIDDEN_EN,
			constraints: constraints(lang, form),
			snippets,
		},
		Lang::Ru => Brief {
			intro: "Ты помощник юриста. Сгенерируй раздел договора \"Порядок расчетов\".",
			params: vec![
				format!("Срок оплаты: {days} дней {trigger}."),
				format!("Предоплата: {}.", yes_no(form.prepayment_required, "требуется", "не требуется")),
				format!(
					"Удержания/зачеты (withholding): {}.",
					yes_no(form.withholding_allowed, "разрешены", "не допускаются, если иное не согласовано")
				),
				format!(
					"Приостановление исполнения при просрочке: {}.",
					yes_no(form.suspension_right, "право есть", "право не предоставляется")
				),
				format!("Банковские комиссии: {charges}."),
				format!("НДС/VAT: {vat}."),
				format!(
					"Неустойка/проценты за просрочку оплаты: {}.",
					yes_no(form.late_payment_penalty_enabled, "включить", "не включать")
				),
				format!(
					"Банковские реквизиты включены в договор: {}.",
					yes_no(form.bank_details_included, "да", "нет")
				),
			],
			structure_note: Some(
				"Каждый подпункт должен начинаться с разных грамматических конструкций, где это возможно.",
			),
			topics: vec![
				"Основание оплаты: счет/инвойс.".to_string(),
				format!("Срок оплаты: {days} дней {trigger}."),
				"Момент исполнения обязательства по оплате: выбери ОДНУ дефиницию (списание ИЛИ зачисление) и используй её везде.".to_string(),
				"Форма расчетов: безналичный порядок (без реквизитов).".to_string(),
				format!("Предоплата: {}.", yes_no(form.prepayment_required, "требуется", "не требуется")),
				format!(
					"Удержания/зачеты (withholding/set-off): {}.",
					yes_no(form.withholding_allowed, "разрешены", "не допускаются, если иное не согласовано")
				),
				format!("Банковские комиссии: {charges}."),
				format!("НДС/VAT: {vat}."),
				"Формат выставления счетов: допускается электронная форма/копии (общо).".to_string(),
				"Срок выставления счета после отгрузки/приемки (общо, без чисел из прецедентов).".to_string(),
				"Документы-основания для оплаты (общо: накладная/акт, без реквизитов).".to_string(),
				"Сверка взаиморасчетов: возможность/порядок акта сверки.".to_string(),
				"Корректировочные документы: корректировочный счет/инвойс (общо).".to_string(),
				"Переплата: возврат/зачет по согласованию сторон (общо).".to_string(),
				"Оплата частичных поставок/этапов (если применимо), общо.".to_string(),
				"Валюта платежа (общо; не указывать валюту, если нет в форме).".to_string(),
				"Запрет/допустимость удержаний: ровно один раз, без дублей.".to_string(),
				"Просрочка оплаты: право приостановления (только если включено формой).".to_string(),
				"Оспариваемые суммы: механизм оплаты неоспариваемой части (без раздела про споры).".to_string(),
				"Подтверждение оплаты и хранение платежных документов (общо).".to_string(),
			],
			forbidden: &FORBIDDEN_RU,
			constraints: constraints(lang, form),
			snippets,
		},
	}
}

fn constraints(lang: Lang, form: &PaymentForm) -> Vec<String> {
	let mut constraints: Vec<&str> = match lang {
		Lang::En => vec![
			"Do not copy factual details from precedents (amounts, currencies, rates, clause numbers, company names, bank details).",
			"Use only what is provided by the Input Form parameters.",
			"Avoid repetition: each idea must appear only once.",
			"No placeholders like [AMOUNT]/[CURRENCY]/[TERM_DAYS] in the final text.",
			"Do NOT start more than three clauses with the same introductory phrase.",
			"Vary the grammatical subject and sentence structure across clauses.",
		],
		Lang::Ru => vec![
			"Не копируй факты и реквизиты из прецедентов (суммы, валюты, ставки, номера пунктов, названия компаний/стран, банковские реквизиты).",
			"Все условия и переключатели берутся ТОЛЬКО из Input Form.",
			"Не повторяй предложения и фразы: каждое утверждение должно появляться только один раз.",
			"Не используй плейсхолдеры вида [AMOUNT]/[CURRENCY]/[TERM_DAYS] в финальном тексте.",
		],
	};

	if !form.bank_details_included {
		constraints.push(lang.pick(
			"Не добавляй банковские реквизиты (можно указать, что реквизиты приведены в договоре/приложении).",
			"Do NOT include bank details (you may state that bank details are provided elsewhere in the contract/annex).",
		));
	}
	if !form.late_payment_penalty_enabled {
		constraints.push(lang.pick(
			"Не добавляй штрафы/пени/проценты за просрочку оплаты (если не включено формой).",
			"Do NOT add penalties/interest for late payment (unless explicitly enabled by the Input Form).",
		));
	}

	constraints.into_iter().map(str::to_string).collect()
}

fn trigger_phrase(lang: Lang, trigger: &str) -> &'static str {
	match (lang, trigger.trim().to_lowercase().as_str()) {
		(Lang::En, "invoice_date") => "from the invoice date",
		(Lang::En, "receipt_of_invoice") => "from the date of receipt of the invoice",
		(Lang::En, "acceptance_date") => "from the acceptance date (signing of acceptance documents)",
		(Lang::En, "delivery_date") => "from the delivery/dispatch date",
		(Lang::En, "signing_date") => "from the contract signing date",
		(Lang::En, _) => "from the agreed triggering event (invoice/acceptance/delivery)",
		(Lang::Ru, "invoice_date") => "с даты выставления счета/инвойса",
		(Lang::Ru, "receipt_of_invoice") => "с даты получения счета/инвойса",
		(Lang::Ru, "acceptance_date") => "с даты подписания документов, подтверждающих приемку",
		(Lang::Ru, "delivery_date") => "с даты поставки (отгрузки) товара",
		(Lang::Ru, "signing_date") => "с даты подписания договора",
		(Lang::Ru, _) => "с даты наступления согласованного события (invoice/acceptance/delivery)",
	}
}

fn bank_charges_phrase(lang: Lang, charges: &str) -> &'static str {
	match (lang, charges.trim().to_lowercase().as_str()) {
		(Lang::En, "payer") => "bank charges are borne by the paying party",
		(Lang::En, "beneficiary") => "bank charges are borne by the receiving party",
		(Lang::En, "shared") => "bank charges are shared as agreed by the Parties",
		(Lang::En, _) => "bank charges are allocated as agreed by the Parties",
		(Lang::Ru, "payer") => "банковские комиссии несет плательщик",
		(Lang::Ru, "beneficiary") => "банковские комиссии несет получатель",
		(Lang::Ru, "shared") => "банковские комиссии распределяются между Сторонами по согласованию",
		(Lang::Ru, _) =>
			"банковские комиссии распределяются в соответствии с применимой практикой и согласованием Сторон",
	}
}

fn vat_mode_phrase(lang: Lang, mode: &str) -> &'static str {
	match (lang, mode.trim().to_lowercase().as_str()) {
		(Lang::En, "exclusive_if_any") => "VAT is added on top of the price, if applicable",
		(Lang::En, "inclusive") => "VAT is included in the price, if applicable",
		(Lang::En, "not_applicable") => "VAT is not applicable",
		(Lang::En, _) => "VAT applies (or not) in accordance with applicable law",
		(Lang::Ru, "exclusive_if_any") => "НДС/VAT начисляется сверх цены, если подлежит применению",
		(Lang::Ru, "inclusive") => "НДС/VAT включен в цену, если подлежит применению",
		(Lang::Ru, "not_applicable") => "НДС/VAT не применяется",
		(Lang::Ru, _) =>
			"НДС/VAT применяется (или не применяется) в соответствии с применимым законодательством",
	}
}
