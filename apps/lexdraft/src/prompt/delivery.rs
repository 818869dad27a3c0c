use super::{Brief, Lang, pick_snippets, yes_no};
use lexdraft_domain::DeliveryForm;

const SNIPPET_MAX_CHARS: usize = 260;
const SNIPPET_KEYWORDS: &[&str] = &[
	"поставк", "отгруз", "доставк", "срок", "график", "парт", "частичн", "упаков", "маркир",
	"перевоз", "транспорт", "погруз", "разгруз", "рис", "право собственности", "приемк", "акт",
	"накладн", "склад", "место поставки", "передач", "delivery", "dispatch", "shipment",
	"shipping", "lead time", "schedule", "partial", "packaging", "marking", "transport", "carrier",
	"loading", "unloading", "risk", "title", "acceptance", "delivery note", "warehouse",
	"delivery point",
];
const FORBIDDEN_EN: [&str; 4] = [
	"Payment terms, penalties/interest for late payment.",
	"Disputes, court/arbitration, claims procedures.",
	"General liability/remedies/indemnities.",
	"Notices as a separate section/mechanism.",
];
const FORBIDDEN_RU: [&str; 4] = [
	"Оплата/расчеты, штрафы/пени/проценты за просрочку оплаты.",
	"Споры/суд/арбитраж/претензии/претензионный порядок.",
	"Общая ответственность/убытки/возмещение (liability/remedies).",
	"Уведомления как отдельный порядок (notices).",
];
const CONSTRAINTS_EN: [&str; 4] = [
	"Do not copy factual details from precedents (addresses, exact dates, Incoterms, company names, clause numbers).",
	"Use only what is provided by the Input Form parameters.",
	"No placeholders like [ADDRESS]/[DATE]/[TERM_DAYS] in the final text.",
	"Avoid repetition: each idea must appear only once.",
];
const CONSTRAINTS_RU: [&str; 4] = [
	"Не копируй факты из прецедентов (адреса, точные даты, Incoterms, названия компаний, номера пунктов).",
	"Все условия и переключатели берутся ТОЛЬКО из Input Form.",
	"Не используй плейсхолдеры вида [ADDRESS]/[DATE]/[TERM_DAYS] в финальном тексте.",
	"Не повторяйся: каждое утверждение только один раз.",
];

pub(super) fn system(lang: Lang) -> &'static str {
	lang.pick(
		"Ты аккуратный юридический ассистент. Строго следуй параметрам и ограничениям из запроса пользователя. Пиши формально-деловым стилем. Не выдумывай факты. Не копируй адреса, сроки, Incoterms, компании и номера пунктов из прецедентов.",
		"You are a careful legal drafting assistant. Strictly follow the user parameters and constraints. Write in a formal legal style. Do not invent facts. Do not copy addresses, specific dates, Incoterms, company names, or clause numbers from precedents.",
	)
}

pub(super) fn retry(lang: Lang, prefix: &str, min_items: u32) -> String {
	match lang {
		Lang::En => format!(
			"You MUST output AT LEAST {min_items} subclauses formatted strictly as {prefix}.1., {prefix}.2., ... each on a new line. DO NOT rewrite existing subclauses; add new ones without repetition. Every new subclause must add a distinct aspect within Delivery Terms only. Do not add payment terms, penalties, or dispute resolution. Keep a formal legal style and increase the content without duplicates."
		),
		Lang::Ru => format!(
			"Нужно НЕ МЕНЕЕ {min_items} подпунктов формата {prefix}.1., {prefix}.2., ... каждый с новой строки. ВАЖНО: не переписывай и не повторяй уже написанные подпункты. Каждый новый подпункт должен добавлять новый аспект и оставаться в рамках условий поставки. Не добавляй оплату, штрафы и споры. Соблюдай юридический стиль и увеличь объём без повторов."
		),
	}
}

pub(super) fn brief(lang: Lang, form: &DeliveryForm, precedents: &[String]) -> Brief {
	let trigger = trigger_phrase(lang, &form.delivery_date_type);
	let risk = risk_transfer_phrase(lang, &form.risk_transfer);
	let documents = acceptance_document_phrase(lang, &form.acceptance_document);
	let days = form.delivery_term_days;
	let place = match form.delivery_place.trim() {
		"" => lang.pick("в согласованное место поставки", "the agreed place of delivery"),
		place => place,
	};
	let incoterms = match form.incoterms.trim() {
		"" => lang.pick("не указывать (нет в форме)", "do not specify (not provided)"),
		incoterms => incoterms,
	};
	let snippets = pick_snippets(precedents, SNIPPET_KEYWORDS, SNIPPET_MAX_CHARS);

	match lang {
		Lang::En => Brief {
			intro: "You are a legal assistant. Generate the contract section \"Delivery Terms\".",
			params: vec![
				format!("Delivery term: {days} days {trigger}."),
				format!("Delivery place: {place}."),
				format!(
					"Partial shipments: {}.",
					yes_no(form.partial_shipments_allowed, "allowed", "not allowed")
				),
				format!("Incoterms: {incoterms}."),
				format!("Risk transfer: {risk}."),
				format!("Delivery/acceptance docs: {documents}."),
				format!(
					"Packaging required: {} (if not specified, keep generic).",
					yes_no(form.packaging_required, "yes", "no")
				),
			],
			structure_note: None,
			topics: vec![
				format!("Delivery term: {days} days; trigger: {trigger}."),
				format!("Delivery place: {place}."),
				format!(
					"Partial shipments: {} (strictly per Input Form).",
					yes_no(form.partial_shipments_allowed, "allowed", "not allowed")
				),
				"Delivery dates are estimates; minor delays do not terminate the whole contract.".to_string(),
				"Delivery schedule per batch / lot and coordination procedure.".to_string(),
				"Packaging requirements (generic; no addresses/spec numbers).".to_string(),
				"Marking and identification of batches/items.".to_string(),
				"Transport organization and allocation of responsibilities (carrier selection).".to_string(),
				"Loading responsibilities and timing.".to_string(),
				"Unloading responsibilities and timing.".to_string(),
				format!("Risk transfer moment: {risk}."),
				"Title transfer moment (if mentioned: keep separate from risk).".to_string(),
				format!("Delivery/acceptance documents: {documents} (generic, no requisites)."),
				"Acceptance procedure (if applicable): inspection, signing, discrepancies handling.".to_string(),
				"Acceptance timeline (if applicable): timeframe and consequences of non-response.".to_string(),
				"Buyer's failure to take delivery: storage/redelivery costs (generic).".to_string(),
				"Supplier may suspend delivery for delivery-related reasons (no payment terms).".to_string(),
				"Safety/Compliance: delivery may be refused if it violates laws/policies (generic).".to_string(),
				"Corrections: re-delivery / replacement logistics (delivery-only framing).".to_string(),
				"Communication on delivery scheduling (generic; no separate notices section).".to_string(),
			],
			forbidden: &FORBIDDEN_EN,
			constraints: CONSTRAINTS_EN.map(str::to_string).to_vec(),
			snippets,
		},
		Lang::Ru => Brief {
			intro: "Ты помощник юриста. Сгенерируй раздел договора \"Условия поставки\".",
			params: vec![
				format!("Срок поставки: {days} дней {trigger}."),
				format!("Место поставки: {place}."),
				format!(
					"Частичные поставки: {}.",
					yes_no(form.partial_shipments_allowed, "разрешены", "не допускаются")
				),
				format!("Incoterms: {incoterms}."),
				format!("Переход рисков: {risk}."),
				format!("Документы поставки/приемки: {documents}."),
				format!(
					"Упаковка: {} (если не задано явно, формулируй общо).",
					yes_no(form.packaging_required, "требуется", "не требуется")
				),
			],
			structure_note: None,
			topics: vec![
				format!("Срок поставки: {days} дней; триггер: {trigger}."),
				format!("Место поставки: {place}."),
				format!(
					"Частичные поставки: {} (строго по форме).",
					yes_no(form.partial_shipments_allowed, "разрешены", "не допускаются")
				),
				"Даты поставки являются ориентировочными; просрочка части поставок не прекращает договор целиком.".to_string(),
				"График поставки/отгрузки по партиям и порядок согласования.".to_string(),
				"Требования к упаковке (общие; без адресов и номеров спецификаций).".to_string(),
				"Маркировка и идентификация партий/единиц товара.".to_string(),
				"Организация перевозки и выбор перевозчика (в общем виде).".to_string(),
				"Погрузка: ответственность, готовность товара к отгрузке.".to_string(),
				"Разгрузка: ответственность и подтверждение факта передачи.".to_string(),
				format!("Момент перехода рисков: {risk}."),
				"Переход права собственности (если упоминаешь, то отдельно от рисков).".to_string(),
				format!("Документы поставки: {documents} (без реквизитов)."),
				"Приемка (если применимо): осмотр, подписание, расхождения.".to_string(),
				"Срок приемки (если применимо): сроки и последствия непредставления замечаний.".to_string(),
				"Неявка/отказ принять поставку: хранение/повторная доставка (в общем виде).".to_string(),
				"Право приостановить поставку по причинам, связанным с поставкой (не про оплату).".to_string(),
				"Комплаенс/безопасность: поставка может быть приостановлена при нарушении требований (в общем виде).".to_string(),
				"Корректировки: повторная доставка/замена логистически (только рамки поставки).".to_string(),
				"Коммуникация по согласованию графика поставки (без отдельной секции notices).".to_string(),
			],
			forbidden: &FORBIDDEN_RU,
			constraints: CONSTRAINTS_RU.map(str::to_string).to_vec(),
			snippets,
		},
	}
}

fn trigger_phrase(lang: Lang, trigger: &str) -> &'static str {
	match (lang, trigger.trim().to_lowercase().as_str()) {
		(Lang::En, "within_days_from_effective") => "from the Effective Date",
		(Lang::En, "within_days_from_signing") => "from the signing date",
		(Lang::En, "from_order_ack") => "from the Order Acknowledgement date",
		(Lang::En, "from_payment") => "from receipt of payment (if applicable)",
		(Lang::En, _) => "from the agreed triggering event",
		(Lang::Ru, "within_days_from_effective") => "с даты вступления договора в силу",
		(Lang::Ru, "within_days_from_signing") => "с даты подписания договора",
		(Lang::Ru, "from_order_ack") => "с даты подтверждения заказа",
		(Lang::Ru, "from_payment") => "с даты поступления оплаты (если применимо)",
		(Lang::Ru, _) => "с даты наступления согласованного события",
	}
}

fn risk_transfer_phrase(lang: Lang, risk_transfer: &str) -> &'static str {
	match (lang, risk_transfer.trim().to_lowercase().as_str()) {
		(Lang::En, "upon_delivery") => "upon delivery to the Buyer at the delivery point",
		(Lang::En, "upon_handover_to_carrier") => "upon handover to the carrier",
		(Lang::En, "upon_loading") => "upon completion of loading",
		(Lang::En, _) => "at the agreed moment of handover",
		(Lang::Ru, "upon_delivery") => "в момент передачи товара Покупателю в месте поставки",
		(Lang::Ru, "upon_handover_to_carrier") => "в момент передачи товара перевозчику",
		(Lang::Ru, "upon_loading") => "по завершении погрузки",
		(Lang::Ru, _) => "в согласованный момент передачи товара",
	}
}

fn acceptance_document_phrase(lang: Lang, document: &str) -> &'static str {
	match (lang, document.trim().to_lowercase().as_str()) {
		(Lang::En, "act" | "acceptance_act") => "acceptance act",
		(Lang::En, "invoice") => "invoice",
		(Lang::En, "delivery_note" | "waybill") => "delivery note / waybill",
		(Lang::En, _) => "standard delivery/acceptance documents",
		(Lang::Ru, "act" | "acceptance_act") => "акт приемки",
		(Lang::Ru, "tn" | "waybill" | "накладная") => "товарная накладная",
		(Lang::Ru, _) => "стандартные документы поставки (накладная/акт)",
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn blank_place_and_incoterms_get_neutral_wording() {
		let brief = brief(Lang::En, &DeliveryForm::default(), &[]);

		assert_eq!(brief.params[1], "Delivery place: the agreed place of delivery.");
		assert_eq!(brief.params[3], "Incoterms: do not specify (not provided).");
		assert_eq!(brief.topics.len(), 20);
	}

	#[test]
	fn form_values_are_used_verbatim() {
		let form = DeliveryForm {
			delivery_place: "склад Покупателя".to_string(),
			incoterms: "FCA".to_string(),
			risk_transfer: "upon_loading".to_string(),
			acceptance_document: "waybill".to_string(),
			partial_shipments_allowed: false,
			..Default::default()
		};
		let brief = brief(Lang::Ru, &form, &[]);

		assert_eq!(brief.params[1], "Место поставки: склад Покупателя.");
		assert_eq!(brief.params[2], "Частичные поставки: не допускаются.");
		assert_eq!(brief.params[3], "Incoterms: FCA.");
		assert_eq!(brief.params[4], "Переход рисков: по завершении погрузки.");
		assert_eq!(brief.params[5], "Документы поставки/приемки: товарная накладная.");
	}

	#[test]
	fn snippets_come_from_delivery_wording() {
		let precedents = vec![
			"Поставка товара осуществляется партиями в соответствии с графиком, согласованным Сторонами. Оплата производится по счету в течение десяти дней."
				.to_string(),
		];
		let brief = brief(Lang::Ru, &DeliveryForm::default(), &precedents);

		assert_eq!(brief.snippets, vec![
			"Поставка товара осуществляется партиями в соответствии с графиком, согласованным Сторонами."
				.to_string()
		]);
	}
}
