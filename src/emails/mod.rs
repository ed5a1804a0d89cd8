// ABOUTME: Localized email template resolution and rendering
// ABOUTME: Subjects and text/html bodies keyed by template name and language
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

//! # Email Templates
//!
//! Resolves localized email content by `(template name, language,
//! part)`, where part is `subject.txt`, `body.txt` or `body.html`.
//! Unknown languages fall back to English; unknown template names or
//! parts are errors. Rendering substitutes `{{ variable }}`
//! placeholders, HTML-escaping values inside HTML bodies.
//!
//! Delivery is out of scope; callers get back the rendered content.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::errors::{AppError, AppResult};

/// Fallback language when a template has no localization for the
/// requested one
pub const DEFAULT_LANGUAGE: &str = "en";

/// Rendered content for one email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub text_body: String,
    /// HTML body
    pub html_body: String,
}

macro_rules! template {
    ($name:literal, $lang:literal, $part:literal) => {
        (
            $name,
            $lang,
            $part,
            include_str!(concat!("templates/", $name, "/", $lang, "/", $part)),
        )
    };
}

// (name, language, part, content)
const TEMPLATES: &[(&str, &str, &str, &str)] = &[
    template!("email_update_to_current_email", "en", "subject.txt"),
    template!("email_update_to_current_email", "en", "body.txt"),
    template!("email_update_to_current_email", "en", "body.html"),
    template!("email_update_to_current_email", "fr", "subject.txt"),
    template!("email_update_to_current_email", "fr", "body.txt"),
    template!("email_update_to_current_email", "fr", "body.html"),
    template!("email_update_to_new_email", "en", "subject.txt"),
    template!("email_update_to_new_email", "en", "body.txt"),
    template!("email_update_to_new_email", "en", "body.html"),
    template!("email_update_to_new_email", "fr", "subject.txt"),
    template!("email_update_to_new_email", "fr", "body.txt"),
    template!("email_update_to_new_email", "fr", "body.html"),
    template!("password_reset_request", "en", "subject.txt"),
    template!("password_reset_request", "en", "body.txt"),
    template!("password_reset_request", "en", "body.html"),
    template!("password_reset_request", "fr", "subject.txt"),
    template!("password_reset_request", "fr", "body.txt"),
    template!("password_reset_request", "fr", "body.html"),
];

fn placeholder_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\{\{\s*(\w+)\s*\}\}").unwrap_or_else(|_| unreachable!()))
}

/// Localized email template resolver
#[derive(Debug, Clone, Default)]
pub struct EmailTemplate;

impl EmailTemplate {
    /// Create a new template resolver
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Resolve and render one part of a template
    ///
    /// # Errors
    ///
    /// Returns an error if the template name or part does not exist
    pub fn get_content(
        &self,
        template_name: &str,
        lang: &str,
        part: &str,
        data: &HashMap<String, String>,
    ) -> AppResult<String> {
        let raw = Self::lookup(template_name, lang, part)
            .or_else(|| Self::lookup(template_name, DEFAULT_LANGUAGE, part))
            .ok_or_else(|| {
                AppError::template(format!(
                    "No template for '{template_name}' ({lang}, {part})"
                ))
            })?;

        let escape_values = part.ends_with(".html");
        Ok(Self::render(raw, data, escape_values))
    }

    /// Resolve and render a full email (subject and both bodies)
    ///
    /// # Errors
    ///
    /// Returns an error if any part of the template is missing
    pub fn render_email(
        &self,
        template_name: &str,
        lang: &str,
        data: &HashMap<String, String>,
    ) -> AppResult<EmailContent> {
        Ok(EmailContent {
            subject: self.get_content(template_name, lang, "subject.txt", data)?,
            text_body: self.get_content(template_name, lang, "body.txt", data)?,
            html_body: self.get_content(template_name, lang, "body.html", data)?,
        })
    }

    fn lookup(template_name: &str, lang: &str, part: &str) -> Option<&'static str> {
        TEMPLATES
            .iter()
            .find(|(name, language, p, _)| {
                *name == template_name && *language == lang && *p == part
            })
            .map(|(_, _, _, content)| *content)
    }

    fn render(raw: &str, data: &HashMap<String, String>, escape_values: bool) -> String {
        placeholder_regex()
            .replace_all(raw, |caps: &regex::Captures<'_>| {
                data.get(&caps[1]).map_or_else(String::new, |value| {
                    if escape_values {
                        html_escape::encode_text(value).into_owned()
                    } else {
                        value.clone()
                    }
                })
            })
            .into_owned()
    }
}
