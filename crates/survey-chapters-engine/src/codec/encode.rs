//! Chapter → HTML.
//!
//! Output is a pure function of the chapter and the site settings: the same
//! input always yields the same bytes. Emission order is fixed by the
//! document template (head, questions, conversation, email, verification
//! widget, buttons, success message, summary, scripts, library includes).

use super::SiteSettings;
use super::escape::{escape_attr, escape_js_string, escape_text, selector_safe};
use super::markup::{
    CHAPTER_NAME_GLOBAL, CHECKBOX_GROUP, CHECKBOX_OPTION, CONVERSATION_ID, EMAIL_ID, OPTION,
    OPTIONS, QUESTION_SECTION, QUESTION_TITLE, QUESTIONS_GLOBAL, RESET_BUTTON, SUBMIT_BUTTON,
    SUCCESS_MESSAGE, SUMMARY_TITLE, TEXT_INPUT_SECTION, conditional_wrapper_class,
    option_input_id, section_id,
};
use crate::models::{Chapter, Question, QuestionKind};

const CHECKBOX_STYLES: &str = r#"
    <style>
        .checkbox-group {
            display: flex;
            flex-direction: column;
            gap: 12px;
        }

        .checkbox-option {
            display: flex;
            align-items: center;
            padding: 12px;
            border: 2px solid #e0e0e0;
            border-radius: 8px;
            cursor: pointer;
            transition: all 0.3s ease;
        }

        .checkbox-option:hover {
            border-color: #667eea;
            background-color: #f5f7ff;
        }

        .checkbox-option input[type="checkbox"] {
            margin-right: 12px;
            cursor: pointer;
            width: 18px;
            height: 18px;
        }

        .checkbox-option label {
            cursor: pointer;
            flex: 1;
            color: #333;
        }

        .checkbox-option input[type="checkbox"]:checked + label {
            color: #667eea;
            font-weight: 500;
        }

        .hidden {
            display: none;
        }

        .conditional-section {
            transition: opacity 0.3s ease;
        }
    </style>"#;

/// Serialize a chapter to a complete HTML document.
pub fn encode(chapter: &Chapter, site: &SiteSettings) -> String {
    let mut html = String::new();

    html.push_str(&format!(
        r#"<!DOCTYPE html>
<html lang="{}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
    <link rel="stylesheet" href="{}">"#,
        chapter.language.code(),
        escape_text(&chapter.title),
        escape_attr(&site.stylesheet_href),
    ));

    if chapter.has_multi_choice() {
        html.push_str(CHECKBOX_STYLES);
    }

    html.push_str(&format!(
        r#"
</head>
<body>
    <div class="container">
        <h1>{}</h1>
        <form id="pollForm">"#,
        escape_text(&chapter.heading)
    ));

    for (index, question) in chapter.questions.iter().enumerate() {
        html.push('\n');
        html.push_str(&encode_question(question, index + 1));
    }

    html.push_str(&format!(
        r#"

            <!-- Conversation Section -->
            <div class="{QUESTION_SECTION}">
                <div class="{QUESTION_TITLE}">{}</div>
                <div class="{TEXT_INPUT_SECTION}">
                    <label for="{CONVERSATION_ID}" style="color: #666; font-size: 14px;">{}</label>
                    <textarea id="{CONVERSATION_ID}" name="{CONVERSATION_ID}" placeholder="{}" required></textarea>
                    <div class="error-message" id="textError" style="display: none;"></div>
                </div>
            </div>"#,
        escape_text(&chapter.conversation.title),
        escape_text(&chapter.conversation.label),
        escape_attr(&chapter.conversation.placeholder),
    ));

    html.push_str(&format!(
        r#"

            <!-- Email Section -->
            <div class="{QUESTION_SECTION}">
                <div class="{QUESTION_TITLE}"><label for="{EMAIL_ID}">{}</label></div>
                <div class="{TEXT_INPUT_SECTION}">
                    <input type="email" id="{EMAIL_ID}" name="{EMAIL_ID}" placeholder="{}" required>
                    <div class="error-message" id="emailError" style="display: none;"></div>
                </div>
            </div>"#,
        escape_text(&chapter.email_label),
        escape_attr(&chapter.email_placeholder),
    ));

    html.push_str(&format!(
        r#"

            <!-- reCAPTCHA -->
            <div class="{QUESTION_SECTION}">
                <div class="g-recaptcha" data-sitekey="{}"></div>
                <div class="error-message" id="recaptchaError" style="display: none;"></div>
            </div>"#,
        escape_attr(&site.recaptcha_site_key),
    ));

    html.push_str(&format!(
        r#"

            <!-- Buttons -->
            <div class="button-group">
                <button type="submit" class="{SUBMIT_BUTTON}" id="submitBtn">{}</button>
                <button type="reset" class="{RESET_BUTTON}" id="resetBtn">{}</button>
            </div>
        </form>"#,
        escape_text(&chapter.submit_text),
        escape_text(&chapter.reset_text),
    ));

    html.push_str(&format!(
        r#"

        <!-- Success Message -->
        <div class="{SUCCESS_MESSAGE}" id="successMessage">
            {}
        </div>"#,
        escape_text(&chapter.success_message),
    ));

    html.push_str(&format!(
        r#"

        <!-- Summary Section -->
        <div class="summary-section" id="summarySection" style="display: none;">
            <h2 class="{SUMMARY_TITLE}">{}</h2>
            <div id="summaryContent"></div>
        </div>
    </div>"#,
        escape_text(&chapter.summary_title),
    ));

    if chapter.has_conditionals() {
        html.push_str(&encode_conditional_script(chapter));
    }

    html.push_str(&encode_metadata_script(chapter));

    html.push_str(&format!(
        r#"

    <!-- EmailJS Library -->
    <script src="https://cdn.jsdelivr.net/npm/emailjs-com@3/dist/email.min.js"></script>
    <script>
        (function() {{
            emailjs.init("{}");
        }})();
    </script>

    <!-- Google reCAPTCHA v2 -->
    <script src="https://www.google.com/recaptcha/api.js" async defer></script>

    <script src="{}"></script>
</body>
</html>
"#,
        escape_js_string(&site.emailjs_public_key),
        escape_attr(&site.survey_script_src),
    ));

    html
}

/// Markup for one question; `position` is 1-based.
fn encode_question(q: &Question, position: usize) -> String {
    let mut html = String::new();
    let id = escape_attr(&q.id);

    html.push_str(&format!("\n            <!-- Q{position} -->"));

    if q.is_conditional() {
        html.push_str(&format!(
            "\n            <div class=\"{}\" id=\"{}\">",
            conditional_wrapper_class(),
            escape_attr(&section_id(&q.id)),
        ));
    } else {
        html.push_str(&format!("\n            <div class=\"{QUESTION_SECTION}\">"));
    }

    html.push_str(&format!(
        "\n                <div class=\"{QUESTION_TITLE}\">{}</div>",
        escape_text(&q.title)
    ));

    let (group_class, option_class) = match q.kind {
        QuestionKind::SingleChoice => (OPTIONS, OPTION),
        QuestionKind::MultiChoice => (CHECKBOX_GROUP, CHECKBOX_OPTION),
    };

    html.push_str(&format!("\n                <div class=\"{group_class}\">"));
    for (i, opt) in q.options.iter().enumerate() {
        let option_id = escape_attr(&option_input_id(&q.id, i + 1));
        let required = if i == 0 && q.enforces_required() {
            " required"
        } else {
            ""
        };
        html.push_str(&format!(
            r#"
                    <div class="{option_class}">
                        <input type="{}" id="{option_id}" name="{id}" value="{}"{required}>
                        <label for="{option_id}">{}</label>
                    </div>"#,
            q.kind.input_type(),
            escape_attr(&opt.value),
            escape_text(&opt.label),
        ));
    }
    html.push_str("\n                </div>");

    html.push_str("\n            </div>");
    html
}

/// Show/hide wiring: one listener block per conditional question.
fn encode_conditional_script(chapter: &Chapter) -> String {
    let mut js = String::from(
        r#"

    <script>
        // Handle conditional questions
        document.addEventListener('DOMContentLoaded', function() {"#,
    );

    let affirmative = escape_js_string(chapter.language.affirmative());

    for (index, q) in chapter.questions.iter().enumerate() {
        let Some(parent) = &q.conditional_on else {
            continue;
        };
        // variables are named by position so they are always valid identifiers
        let var = format!("q{}", index + 1);
        let child = selector_safe(&q.id);
        let parent = selector_safe(parent);

        js.push_str(&format!(
            r#"
            const {var}Triggers = document.querySelectorAll('input[name="{parent}"]');
            const {var}Section = document.getElementById('{child}-section');
            const {var}Inputs = document.querySelectorAll('#{child}-section input[type="{input_type}"]');

            // {parent_upper} -> {child_upper} logic
            {var}Triggers.forEach(trigger => {{
                trigger.addEventListener('change', function() {{
                    if (this.value === '{affirmative}') {{
                        {var}Section.classList.remove('hidden');
                    }} else {{
                        {var}Section.classList.add('hidden');
                        // Clear {child_upper} selections
                        {var}Inputs.forEach(input => {{
                            input.checked = false;
                        }});
                    }}
                }});
            }});"#,
            input_type = q.kind.input_type(),
            parent_upper = parent.to_uppercase(),
            child_upper = child.to_uppercase(),
        ));
    }

    js.push_str(
        r#"
        });
    </script>"#,
    );
    js
}

/// Question text lookup and chapter name for the submission script.
fn encode_metadata_script(chapter: &Chapter) -> String {
    let mut entries: Vec<String> = chapter
        .questions
        .iter()
        .map(|q| format!("{}: \"{}\"", selector_safe(&q.id), escape_js_string(&q.title)))
        .collect();
    if !chapter.conversation.label.is_empty() {
        entries.push(format!(
            "{CONVERSATION_ID}: \"{}\"",
            escape_js_string(&chapter.conversation.label)
        ));
    }

    let mut js = format!(
        r#"

    <script>
        // Define questions for this survey
        {QUESTIONS_GLOBAL} = {{"#
    );
    js.push_str(
        &entries
            .iter()
            .map(|entry| format!("\n            {entry}"))
            .collect::<Vec<_>>()
            .join(","),
    );
    js.push_str(&format!(
        r#"
        }};

        // Define the chapter name for this survey
        {CHAPTER_NAME_GLOBAL} = "{}";
    </script>"#,
        escape_js_string(&chapter.chapter_name)
    ));
    js
}
