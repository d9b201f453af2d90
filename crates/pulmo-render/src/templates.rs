//! Built-in text templates. Names end in `.txt` so Tera leaves output
//! unescaped.

pub const EVALUATION: &str = "evaluation.txt";
pub const CALCULATORS: &str = "calculators.txt";
pub const CALCULATOR: &str = "calculator.txt";
pub const TOPICS: &str = "topics.txt";
pub const TOPIC: &str = "topic.txt";
pub const GLOSSARY: &str = "glossary.txt";
pub const QUESTION: &str = "question.txt";
pub const FEEDBACK: &str = "feedback.txt";
pub const CASES: &str = "cases.txt";
pub const CASE: &str = "case.txt";

pub const DISCLAIMER: &str = "Educational use only. Not for clinical decision-making.";

pub const EVALUATION_TEMPLATE: &str = r#"{{ name }}
Result: {{ evaluation.tier }}{% if evaluation.score is number %} (score {{ evaluation.score }}){% endif %}
{% for d in evaluation.details %}  {{ d.label }}: {{ d.value }}
{% endfor %}{% if evaluation.guidance %}
Guidance:
{% for g in evaluation.guidance %}  - {{ g }}
{% endfor %}{% endif %}{% if evaluation.flags %}
{% for f in evaluation.flags %}  [{% if f.value %}x{% else %} {% endif %}] {{ f.label }}
{% endfor %}{% endif %}
{{ disclaimer }}
"#;

pub const CALCULATORS_TEMPLATE: &str = r#"{% for c in calculators %}{{ c.id }} - {{ c.name }} [{{ c.topic }}]
    {{ c.description }}
{% endfor %}"#;

pub const CALCULATOR_TEMPLATE: &str = r#"{{ calc.name }} ({{ calc.id }})
{{ calc.description }}

Inputs:
{% for f in calc.fields %}  {{ f.id }}{% if f.optional %} (optional){% endif %}: {{ f.label }} {% if f.kind.type == "number" %}[number {{ f.kind.range.min }} to {{ f.kind.range.max }}{% if f.kind.unit %} {{ f.kind.unit }}{% endif %}]{% elif f.kind.type == "flag" %}[yes/no]{% elif f.kind.type == "choice" %}[one of: {{ f.kind.options | map(attribute="value") | join(sep=", ") }}]{% else %}[any of: {{ f.kind.options | map(attribute="value") | join(sep=", ") }}]{% endif %}
{% if f.help %}      {{ f.help }}
{% endif %}{% endfor %}"#;

pub const TOPICS_TEMPLATE: &str = r#"{% for t in topics %}{{ t.id }} - {{ t.title }}
    {{ t.description }}
{% endfor %}"#;

pub const TOPIC_TEMPLATE: &str = r#"{{ topic.title }}
{{ topic.description }}
{% for s in topic.sections %}
{{ s.title }}
{% for i in s.items %}  - {{ i }}
{% endfor %}{% endfor %}{% if topic.calculator_ids %}
Calculators: {{ topic.calculator_ids | join(sep=", ") }}
{% endif %}"#;

pub const GLOSSARY_TEMPLATE: &str = r#"{% for t in terms %}{{ t.term }} [{{ t.category }}]
    {{ t.definition }}
{% endfor %}{% if not terms %}No matching terms.
{% endif %}"#;

pub const QUESTION_TEMPLATE: &str = r#"{% if header %}{{ header }}
{% endif %}{{ question }}
{% for o in options %}  {{ o.letter }}. {{ o.text }}
{% endfor %}"#;

pub const FEEDBACK_TEMPLATE: &str = r#"{% if feedback.is_correct %}Correct!{% else %}Incorrect. The answer is {{ correct_letter }}.{% endif %}
{{ feedback.explanation }}
{% if feedback.next_step is defined %}
{{ feedback.next_step }}
{% endif %}"#;

pub const CASES_TEMPLATE: &str = r#"{% for c in cases %}{{ c.id }} - {{ c.title }} [{{ c.category }}]
    {{ c.description }}
{% endfor %}"#;

pub const CASE_TEMPLATE: &str = r#"{{ case.title }} ({{ case.category }})

{{ case.presentation }}
"#;

/// Every built-in template as (name, source).
pub fn builtin() -> [(&'static str, &'static str); 10] {
    [
        (EVALUATION, EVALUATION_TEMPLATE),
        (CALCULATORS, CALCULATORS_TEMPLATE),
        (CALCULATOR, CALCULATOR_TEMPLATE),
        (TOPICS, TOPICS_TEMPLATE),
        (TOPIC, TOPIC_TEMPLATE),
        (GLOSSARY, GLOSSARY_TEMPLATE),
        (QUESTION, QUESTION_TEMPLATE),
        (FEEDBACK, FEEDBACK_TEMPLATE),
        (CASES, CASES_TEMPLATE),
        (CASE, CASE_TEMPLATE),
    ]
}
