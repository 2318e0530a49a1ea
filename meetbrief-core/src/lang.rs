//! Report-language selection and the localized UI-string tables.
//!
//! The report language is either chosen explicitly or, for
//! [`TargetLanguage::Original`], inferred from the analysis document's own
//! text with script-range heuristics. Every fixed label the renderers emit
//! comes from a [`UiStrings`] table; nothing user-visible is hard-coded in
//! one language.

use crate::analysis::AnalysisDocument;
use serde::{Deserialize, Serialize};

/// Product name shown in report headers and captions. Not localized.
pub const BRAND: &str = "MeetBrief";

/// The language the user asked the report to be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    Ru,
    En,
    Kk,
    Es,
    Zh,
    /// "Same as the recording": resolved from document content at render time.
    Original,
}

impl TargetLanguage {
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "ru" => Some(Self::Ru),
            "en" => Some(Self::En),
            "kk" | "kz" => Some(Self::Kk),
            "es" => Some(Self::Es),
            "zh" => Some(Self::Zh),
            "original" | "orig" | "auto" => Some(Self::Original),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Ru => "ru",
            Self::En => "en",
            Self::Kk => "kk",
            Self::Es => "es",
            Self::Zh => "zh",
            Self::Original => "original",
        }
    }

    /// Resolves the concrete report language, inferring from the document's
    /// content for [`TargetLanguage::Original`].
    pub fn resolve(self, doc: &AnalysisDocument) -> ReportLanguage {
        match self {
            Self::Ru => ReportLanguage::Ru,
            Self::En => ReportLanguage::En,
            Self::Kk => ReportLanguage::Kk,
            Self::Es => ReportLanguage::Es,
            Self::Zh => ReportLanguage::Zh,
            Self::Original => detect_content_language(&doc.sample_text(2000)),
        }
    }
}

/// A concrete language a report is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportLanguage {
    Ru,
    En,
    Kk,
    Es,
    Zh,
}

impl ReportLanguage {
    pub fn code(self) -> &'static str {
        match self {
            Self::Ru => "ru",
            Self::En => "en",
            Self::Kk => "kk",
            Self::Es => "es",
            Self::Zh => "zh",
        }
    }

    pub fn ui(self) -> &'static UiStrings {
        match self {
            Self::Ru => &RU,
            Self::En => &EN,
            Self::Kk => &KK,
            Self::Es => &ES,
            Self::Zh => &ZH,
        }
    }

    /// Whether rendering this language needs a CJK-capable font.
    pub fn needs_cjk_font(self) -> bool {
        matches!(self, Self::Zh)
    }
}

const KAZAKH_LETTERS: &str = "ӘәҒғҚқҢңӨөҰұҮүІі";
const SPANISH_LETTERS: &str = "ñáéíóúüÑÁÉÍÓÚÜ¿¡";

/// Infers the dominant language of a text sample.
///
/// Heuristics mirror the report chrome we can actually localize: CJK density
/// first, then Cyrillic-vs-Latin ratio (with Kazakh-specific letters breaking
/// the tie), then Spanish diacritics. Falls back to English when nothing is
/// confident.
pub fn detect_content_language(sample: &str) -> ReportLanguage {
    let mut cjk = 0usize;
    let mut cyrillic = 0usize;
    let mut latin = 0usize;

    for ch in sample.chars() {
        if ('\u{4e00}'..='\u{9fff}').contains(&ch) {
            cjk += 1;
        } else if ('\u{0400}'..='\u{04ff}').contains(&ch) {
            cyrillic += 1;
        } else if ch.is_ascii_alphabetic() {
            latin += 1;
        }
    }

    if cjk > 10 {
        return ReportLanguage::Zh;
    }

    if cyrillic > latin {
        if sample.chars().any(|ch| KAZAKH_LETTERS.contains(ch)) {
            return ReportLanguage::Kk;
        }
        return ReportLanguage::Ru;
    }

    if sample.chars().any(|ch| SPANISH_LETTERS.contains(ch)) {
        return ReportLanguage::Es;
    }

    ReportLanguage::En
}

/// Fixed UI chrome for one report language. One table per supported language;
/// renderers never format label text themselves.
#[derive(Debug, Serialize)]
pub struct UiStrings {
    pub report_from: &'static str,
    pub page: &'static str,
    pub generated: &'static str,
    pub date: &'static str,
    pub duration: &'static str,
    pub participants: &'static str,
    pub format: &'static str,
    pub domain: &'static str,
    pub tone: &'static str,
    pub executive_summary: &'static str,

    pub topic: &'static str,
    pub topics: &'static str,
    pub discussion_flow: &'static str,
    pub key_points: &'static str,
    pub positions: &'static str,
    pub outcome: &'static str,
    pub quotes: &'static str,
    pub unresolved: &'static str,
    pub raised_by: &'static str,

    pub decisions: &'static str,
    pub decision: &'static str,
    pub responsible: &'static str,
    pub status: &'static str,

    pub open_questions: &'static str,
    pub reason: &'static str,
    pub impact: &'static str,

    pub dynamics: &'static str,
    pub participation: &'static str,
    pub interaction: &'static str,
    pub interruptions: &'static str,
    pub topic_initiators: &'static str,
    pub enthusiasm: &'static str,
    pub tension: &'static str,
    pub uncertainty_moments: &'static str,
    pub turning_points: &'static str,
    pub between_lines: &'static str,

    pub recommendations: &'static str,
    pub recommendation: &'static str,
    pub why: &'static str,
    pub how: &'static str,
    pub by_substance: &'static str,
    pub by_process: &'static str,
    pub tools_methods: &'static str,
    pub benchmarks: &'static str,
    pub next_meeting: &'static str,

    pub tasks: &'static str,
    pub task: &'static str,
    pub deadline: &'static str,

    pub meeting_goals: &'static str,
    pub explicit_goals: &'static str,
    pub implicit_goals: &'static str,

    pub swot_title: &'static str,
    pub swot_strengths: &'static str,
    pub swot_weaknesses: &'static str,
    pub swot_opportunities: &'static str,
    pub swot_threats: &'static str,

    pub risks_title: &'static str,
    pub risk: &'static str,
    pub probability: &'static str,
    pub impact_label: &'static str,
    pub mitigation: &'static str,

    pub action_plan_title: &'static str,
    pub urgent: &'static str,
    pub medium_term: &'static str,
    pub long_term: &'static str,
    pub kpi: &'static str,

    pub conclusion_title: &'static str,
    pub main_insight: &'static str,
    pub key_recommendation: &'static str,
    pub forecast: &'static str,

    pub uncertainties_title: &'static str,
    pub context: &'static str,
    pub possibly: &'static str,

    pub corrections_title: &'static str,
    pub glossary_title: &'static str,

    pub transcript: &'static str,
    pub overview: &'static str,
    pub decisions_and_tasks: &'static str,
    pub no_decisions: &'static str,
    pub transcript_unavailable: &'static str,
    pub footer: &'static str,

    pub caption_pdf: &'static str,
    pub caption_html: &'static str,
    pub caption_txt: &'static str,
}

pub static EN: UiStrings = UiStrings {
    report_from: "Report from",
    page: "Page",
    generated: "Generated",
    date: "Date",
    duration: "Duration",
    participants: "Participants",
    format: "Format",
    domain: "Domain",
    tone: "Tone",
    executive_summary: "Executive summary",
    topic: "Topic",
    topics: "DISCUSSION TOPICS",
    discussion_flow: "Discussion flow",
    key_points: "Key points",
    positions: "Participant positions",
    outcome: "Outcome",
    quotes: "Quotes",
    unresolved: "Unresolved",
    raised_by: "Raised by",
    decisions: "DECISIONS",
    decision: "Decision",
    responsible: "Responsible",
    status: "Status",
    open_questions: "OPEN QUESTIONS",
    reason: "Reason",
    impact: "Impact",
    dynamics: "MEETING DYNAMICS",
    participation: "Participation balance",
    interaction: "Interaction",
    interruptions: "Interruptions",
    topic_initiators: "Topic initiators",
    enthusiasm: "Enthusiasm",
    tension: "Tension",
    uncertainty_moments: "Uncertainty",
    turning_points: "Turning points",
    between_lines: "Between the lines",
    recommendations: "EXPERT RECOMMENDATIONS",
    recommendation: "Recommendation",
    why: "Why",
    how: "How",
    by_substance: "On substance",
    by_process: "On process",
    tools_methods: "Tools and methods",
    benchmarks: "Benchmarks and examples",
    next_meeting: "Questions for next meeting",
    tasks: "ACTION ITEMS",
    task: "Task",
    deadline: "Deadline",
    meeting_goals: "MEETING GOALS",
    explicit_goals: "Explicit goals",
    implicit_goals: "Implicit goals",
    swot_title: "STRATEGIC SWOT ANALYSIS",
    swot_strengths: "Strengths",
    swot_weaknesses: "Weaknesses",
    swot_opportunities: "Opportunities",
    swot_threats: "Threats",
    risks_title: "RISKS AND HOW TO AVOID THEM",
    risk: "Risk",
    probability: "Probability",
    impact_label: "Impact",
    mitigation: "Mitigation",
    action_plan_title: "ACTION PLAN",
    urgent: "Urgent (1-7 days)",
    medium_term: "Medium term (1-4 weeks)",
    long_term: "Long term (1-3 months)",
    kpi: "KPIs and success metrics",
    conclusion_title: "CONCLUSION",
    main_insight: "Main insight",
    key_recommendation: "Key recommendation",
    forecast: "Forecast",
    uncertainties_title: "NEEDS CLARIFICATION",
    context: "Context",
    possibly: "Possibly",
    corrections_title: "TRANSCRIPTION CORRECTIONS",
    glossary_title: "GLOSSARY",
    transcript: "Transcript",
    overview: "Overview",
    decisions_and_tasks: "Decisions & tasks",
    no_decisions: "No specific decisions or tasks were recorded.",
    transcript_unavailable: "Transcript unavailable",
    footer: "AI meeting analysis",
    caption_pdf: "PDF report",
    caption_html: "Interactive HTML",
    caption_txt: "Transcript (TXT)",
};

pub static RU: UiStrings = UiStrings {
    report_from: "Отчёт от",
    page: "Стр.",
    generated: "Сгенерировано",
    date: "Дата",
    duration: "Длительность",
    participants: "Участники",
    format: "Формат",
    domain: "Область",
    tone: "Тон",
    executive_summary: "Резюме",
    topic: "Тема",
    topics: "ТЕМЫ ОБСУЖДЕНИЯ",
    discussion_flow: "Ход обсуждения",
    key_points: "Ключевые тезисы",
    positions: "Позиции участников",
    outcome: "Итог",
    quotes: "Цитаты",
    unresolved: "Нерешённые вопросы",
    raised_by: "Тему поднял(а)",
    decisions: "РЕШЕНИЯ",
    decision: "Решение",
    responsible: "Ответственный",
    status: "Статус",
    open_questions: "ОТКРЫТЫЕ ВОПРОСЫ",
    reason: "Причина",
    impact: "Влияние",
    dynamics: "ДИНАМИКА ВСТРЕЧИ",
    participation: "Баланс участия",
    interaction: "Взаимодействие",
    interruptions: "Перебивания",
    topic_initiators: "Инициаторы тем",
    enthusiasm: "Энтузиазм",
    tension: "Напряжение",
    uncertainty_moments: "Неуверенность",
    turning_points: "Переломные моменты",
    between_lines: "Между строк",
    recommendations: "РЕКОМЕНДАЦИИ ЭКСПЕРТА",
    recommendation: "Рекомендация",
    why: "Почему",
    how: "Как",
    by_substance: "По существу вопроса",
    by_process: "По процессу",
    tools_methods: "Инструменты и методологии",
    benchmarks: "Бенчмарки и примеры",
    next_meeting: "Вопросы для следующей встречи",
    tasks: "ЗАДАЧИ",
    task: "Задача",
    deadline: "Срок",
    meeting_goals: "ЦЕЛИ ВСТРЕЧИ",
    explicit_goals: "Явные цели",
    implicit_goals: "Скрытые цели",
    swot_title: "СТРАТЕГИЧЕСКИЙ SWOT-АНАЛИЗ",
    swot_strengths: "Сильные стороны",
    swot_weaknesses: "Слабые стороны",
    swot_opportunities: "Возможности",
    swot_threats: "Угрозы",
    risks_title: "РИСКИ И КАК ИХ ИЗБЕЖАТЬ",
    risk: "Риск",
    probability: "Вероятность",
    impact_label: "Влияние",
    mitigation: "Как предотвратить",
    action_plan_title: "ПЛАН ДАЛЬНЕЙШИХ ДЕЙСТВИЙ",
    urgent: "Срочно (1-7 дней)",
    medium_term: "Среднесрок (1-4 недели)",
    long_term: "Долгосрок (1-3 месяца)",
    kpi: "KPI и метрики успеха",
    conclusion_title: "ЗАКЛЮЧЕНИЕ",
    main_insight: "Главный инсайт",
    key_recommendation: "Ключевая рекомендация",
    forecast: "Прогноз",
    uncertainties_title: "ТРЕБУЕТ УТОЧНЕНИЯ",
    context: "Контекст",
    possibly: "Возможно",
    corrections_title: "ИСПРАВЛЕНИЯ РАСПОЗНАВАНИЯ",
    glossary_title: "ГЛОССАРИЙ",
    transcript: "Транскрипт",
    overview: "Обзор",
    decisions_and_tasks: "Решения и задачи",
    no_decisions: "Конкретных решений и задач не зафиксировано.",
    transcript_unavailable: "Транскрипция недоступна",
    footer: "AI-анализ встречи",
    caption_pdf: "PDF-отчёт",
    caption_html: "Интерактивный HTML",
    caption_txt: "Транскрипция (TXT)",
};

pub static KK: UiStrings = UiStrings {
    report_from: "Есеп күні",
    page: "Бет",
    generated: "Жасалған",
    date: "Күні",
    duration: "Ұзақтығы",
    participants: "Қатысушылар",
    format: "Формат",
    domain: "Сала",
    tone: "Тон",
    executive_summary: "Қысқаша түйін",
    topic: "Тақырып",
    topics: "ТАЛҚЫЛАУ ТАҚЫРЫПТАРЫ",
    discussion_flow: "Талқылау барысы",
    key_points: "Негізгі тезистер",
    positions: "Қатысушылардың ұстанымдары",
    outcome: "Нәтиже",
    quotes: "Дәйексөздер",
    unresolved: "Шешілмеген мәселелер",
    raised_by: "Тақырыпты көтерген",
    decisions: "ШЕШІМДЕР",
    decision: "Шешім",
    responsible: "Жауапты",
    status: "Мәртебесі",
    open_questions: "АШЫҚ СҰРАҚТАР",
    reason: "Себеп",
    impact: "Әсер",
    dynamics: "КЕЗДЕСУ ДИНАМИКАСЫ",
    participation: "Қатысу балансы",
    interaction: "Өзара әрекеттестік",
    interruptions: "Сөзін бөлу",
    topic_initiators: "Тақырып бастамашылары",
    enthusiasm: "Ынта",
    tension: "Шиеленіс",
    uncertainty_moments: "Сенімсіздік",
    turning_points: "Бетбұрыс сәттер",
    between_lines: "Жолдар арасында",
    recommendations: "САРАПШЫ ҰСЫНЫСТАРЫ",
    recommendation: "Ұсыныс",
    why: "Неліктен",
    how: "Қалай",
    by_substance: "Мәселе бойынша",
    by_process: "Процесс бойынша",
    tools_methods: "Құралдар мен әдістемелер",
    benchmarks: "Бенчмарктар мен мысалдар",
    next_meeting: "Келесі кездесуге сұрақтар",
    tasks: "ТАПСЫРМАЛАР",
    task: "Тапсырма",
    deadline: "Мерзімі",
    meeting_goals: "КЕЗДЕСУ МАҚСАТТАРЫ",
    explicit_goals: "Айқын мақсаттар",
    implicit_goals: "Жасырын мақсаттар",
    swot_title: "СТРАТЕГИЯЛЫҚ SWOT-ТАЛДАУ",
    swot_strengths: "Күшті жақтары",
    swot_weaknesses: "Әлсіз жақтары",
    swot_opportunities: "Мүмкіндіктер",
    swot_threats: "Қауіптер",
    risks_title: "ТӘУЕКЕЛДЕР ЖӘНЕ АЛДЫН АЛУ",
    risk: "Тәуекел",
    probability: "Ықтималдық",
    impact_label: "Әсер",
    mitigation: "Алдын алу жолы",
    action_plan_title: "ІС-ҚИМЫЛ ЖОСПАРЫ",
    urgent: "Шұғыл (1-7 күн)",
    medium_term: "Орта мерзім (1-4 апта)",
    long_term: "Ұзақ мерзім (1-3 ай)",
    kpi: "KPI және табыс метрикалары",
    conclusion_title: "ҚОРЫТЫНДЫ",
    main_insight: "Басты түйін",
    key_recommendation: "Негізгі ұсыныс",
    forecast: "Болжам",
    uncertainties_title: "НАҚТЫЛАУДЫ ҚАЖЕТ ЕТЕДІ",
    context: "Контекст",
    possibly: "Мүмкін",
    corrections_title: "ТАНУ ТҮЗЕТУЛЕРІ",
    glossary_title: "ГЛОССАРИЙ",
    transcript: "Транскрипт",
    overview: "Шолу",
    decisions_and_tasks: "Шешімдер мен тапсырмалар",
    no_decisions: "Нақты шешімдер мен тапсырмалар тіркелмеді.",
    transcript_unavailable: "Транскрипция қолжетімсіз",
    footer: "AI кездесу талдауы",
    caption_pdf: "PDF-есеп",
    caption_html: "Интерактивті HTML",
    caption_txt: "Транскрипция (TXT)",
};

pub static ES: UiStrings = UiStrings {
    report_from: "Informe del",
    page: "Pág.",
    generated: "Generado",
    date: "Fecha",
    duration: "Duración",
    participants: "Participantes",
    format: "Formato",
    domain: "Área",
    tone: "Tono",
    executive_summary: "Resumen ejecutivo",
    topic: "Tema",
    topics: "TEMAS DE DISCUSIÓN",
    discussion_flow: "Curso de la discusión",
    key_points: "Puntos clave",
    positions: "Posiciones de los participantes",
    outcome: "Resultado",
    quotes: "Citas",
    unresolved: "Sin resolver",
    raised_by: "Tema planteado por",
    decisions: "DECISIONES",
    decision: "Decisión",
    responsible: "Responsable",
    status: "Estado",
    open_questions: "PREGUNTAS ABIERTAS",
    reason: "Razón",
    impact: "Impacto",
    dynamics: "DINÁMICA DE LA REUNIÓN",
    participation: "Balance de participación",
    interaction: "Interacción",
    interruptions: "Interrupciones",
    topic_initiators: "Iniciadores de temas",
    enthusiasm: "Entusiasmo",
    tension: "Tensión",
    uncertainty_moments: "Incertidumbre",
    turning_points: "Puntos de inflexión",
    between_lines: "Entre líneas",
    recommendations: "RECOMENDACIONES DEL EXPERTO",
    recommendation: "Recomendación",
    why: "Por qué",
    how: "Cómo",
    by_substance: "Sobre el fondo",
    by_process: "Sobre el proceso",
    tools_methods: "Herramientas y metodologías",
    benchmarks: "Referencias y ejemplos",
    next_meeting: "Preguntas para la próxima reunión",
    tasks: "TAREAS",
    task: "Tarea",
    deadline: "Plazo",
    meeting_goals: "OBJETIVOS DE LA REUNIÓN",
    explicit_goals: "Objetivos explícitos",
    implicit_goals: "Objetivos implícitos",
    swot_title: "ANÁLISIS SWOT ESTRATÉGICO",
    swot_strengths: "Fortalezas",
    swot_weaknesses: "Debilidades",
    swot_opportunities: "Oportunidades",
    swot_threats: "Amenazas",
    risks_title: "RIESGOS Y CÓMO EVITARLOS",
    risk: "Riesgo",
    probability: "Probabilidad",
    impact_label: "Impacto",
    mitigation: "Mitigación",
    action_plan_title: "PLAN DE ACCIÓN",
    urgent: "Urgente (1-7 días)",
    medium_term: "Medio plazo (1-4 semanas)",
    long_term: "Largo plazo (1-3 meses)",
    kpi: "KPI y métricas de éxito",
    conclusion_title: "CONCLUSIÓN",
    main_insight: "Conclusión principal",
    key_recommendation: "Recomendación clave",
    forecast: "Pronóstico",
    uncertainties_title: "NECESITA ACLARACIÓN",
    context: "Contexto",
    possibly: "Posiblemente",
    corrections_title: "CORRECCIONES DE TRANSCRIPCIÓN",
    glossary_title: "GLOSARIO",
    transcript: "Transcripción",
    overview: "Resumen",
    decisions_and_tasks: "Decisiones y tareas",
    no_decisions: "No se registraron decisiones ni tareas concretas.",
    transcript_unavailable: "Transcripción no disponible",
    footer: "Análisis de reunión con IA",
    caption_pdf: "Informe PDF",
    caption_html: "HTML interactivo",
    caption_txt: "Transcripción (TXT)",
};

pub static ZH: UiStrings = UiStrings {
    report_from: "报告日期",
    page: "页",
    generated: "生成时间",
    date: "日期",
    duration: "时长",
    participants: "参与者",
    format: "格式",
    domain: "领域",
    tone: "语气",
    executive_summary: "执行摘要",
    topic: "主题",
    topics: "讨论主题",
    discussion_flow: "讨论过程",
    key_points: "要点",
    positions: "参与者立场",
    outcome: "结果",
    quotes: "引述",
    unresolved: "未解决",
    raised_by: "话题发起人",
    decisions: "决策",
    decision: "决定",
    responsible: "负责人",
    status: "状态",
    open_questions: "待解决问题",
    reason: "原因",
    impact: "影响",
    dynamics: "会议动态",
    participation: "参与平衡",
    interaction: "互动",
    interruptions: "打断",
    topic_initiators: "话题发起者",
    enthusiasm: "热情",
    tension: "紧张",
    uncertainty_moments: "不确定",
    turning_points: "转折点",
    between_lines: "言外之意",
    recommendations: "专家建议",
    recommendation: "建议",
    why: "原因",
    how: "方法",
    by_substance: "实质性建议",
    by_process: "流程建议",
    tools_methods: "工具与方法",
    benchmarks: "基准与示例",
    next_meeting: "下次会议问题",
    tasks: "任务",
    task: "任务",
    deadline: "截止日期",
    meeting_goals: "会议目标",
    explicit_goals: "明确目标",
    implicit_goals: "隐性目标",
    swot_title: "战略SWOT分析",
    swot_strengths: "优势",
    swot_weaknesses: "劣势",
    swot_opportunities: "机会",
    swot_threats: "威胁",
    risks_title: "风险与预防",
    risk: "风险",
    probability: "概率",
    impact_label: "影响",
    mitigation: "预防措施",
    action_plan_title: "行动计划",
    urgent: "紧急 (1-7天)",
    medium_term: "中期 (1-4周)",
    long_term: "长期 (1-3个月)",
    kpi: "KPI与成功指标",
    conclusion_title: "结论",
    main_insight: "主要洞察",
    key_recommendation: "关键建议",
    forecast: "预测",
    uncertainties_title: "需要澄清",
    context: "上下文",
    possibly: "可能",
    corrections_title: "转录修正",
    glossary_title: "术语表",
    transcript: "转录文本",
    overview: "概览",
    decisions_and_tasks: "决策与任务",
    no_decisions: "未记录具体决策或任务。",
    transcript_unavailable: "转录不可用",
    footer: "AI会议分析",
    caption_pdf: "PDF报告",
    caption_html: "交互式HTML",
    caption_txt: "转录文本 (TXT)",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_cyrillic_as_russian() {
        let sample = "Обсудили бюджет проекта и сроки запуска в следующем квартале.";
        assert_eq!(detect_content_language(sample), ReportLanguage::Ru);
    }

    #[test]
    fn kazakh_letters_win_over_plain_cyrillic() {
        let sample = "Кездесуде жоба мақсаттары және қаржыландыру мәселесі талқыланды.";
        assert_eq!(detect_content_language(sample), ReportLanguage::Kk);
    }

    #[test]
    fn dense_cjk_is_chinese() {
        let sample = "会议讨论了产品发布时间表和预算分配问题，并确定了下一步行动计划。";
        assert_eq!(detect_content_language(sample), ReportLanguage::Zh);
    }

    #[test]
    fn spanish_diacritics_detected() {
        let sample = "La reunión trató sobre la planificación del próximo trimestre.";
        assert_eq!(detect_content_language(sample), ReportLanguage::Es);
    }

    #[test]
    fn plain_latin_falls_back_to_english() {
        let sample = "The team discussed the launch timeline and budget.";
        assert_eq!(detect_content_language(sample), ReportLanguage::En);
    }

    #[test]
    fn resolve_uses_document_content_for_original() {
        let doc: AnalysisDocument = serde_json::from_str(
            r#"{"executive_summary": "Команда обсудила запуск продукта и распределение бюджета между направлениями."}"#,
        )
        .unwrap();
        assert_eq!(TargetLanguage::Original.resolve(&doc), ReportLanguage::Ru);
        assert_eq!(TargetLanguage::Es.resolve(&doc), ReportLanguage::Es);
    }

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!(TargetLanguage::parse("KZ"), Some(TargetLanguage::Kk));
        assert_eq!(TargetLanguage::parse("auto"), Some(TargetLanguage::Original));
        assert_eq!(TargetLanguage::parse("fr"), None);
    }
}
