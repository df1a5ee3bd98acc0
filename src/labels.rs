//! Fixed labels used in generated documents.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Label preset selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English labels, left-to-right by default
    #[default]
    #[serde(alias = "en")]
    English,
    /// Persian labels, right-to-left by default
    #[serde(alias = "fa")]
    Persian,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::English => f.write_str("english"),
            Language::Persian => f.write_str("persian"),
        }
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "persian" | "fa" => Ok(Language::Persian),
            other => Err(Error::InvalidSettings(format!("unknown language '{}'", other))),
        }
    }
}

/// Every fixed string a generated document carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    /// Natural direction of the preset
    pub right_to_left: bool,

    // Default section titles and texts
    pub document_title: &'static str,
    pub intro_text: &'static str,
    pub toc_title: &'static str,
    pub toc_placeholder: &'static str,
    pub info_title: &'static str,
    pub intro_title: &'static str,
    pub index_title: &'static str,
    pub changelog_title: &'static str,
    pub shared_model_title: &'static str,
    pub shared_errors_title: &'static str,
    pub endpoints_title: &'static str,

    // Info table
    pub info_name: &'static str,
    pub info_base_url: &'static str,
    pub info_version: &'static str,
    pub info_api_type: &'static str,
    pub info_api_type_value: &'static str,
    pub info_rate_limiting: &'static str,
    pub info_usage: &'static str,
    pub info_release_date: &'static str,
    pub info_limitations: &'static str,

    // Shared column headers
    pub address: &'static str,
    pub method: &'static str,
    pub summary: &'static str,
    pub description: &'static str,
    pub row: &'static str,
    pub version: &'static str,
    pub date: &'static str,
    pub developer: &'static str,
    pub notes: &'static str,
    pub field: &'static str,
    pub explanation: &'static str,
    pub example: &'static str,
    pub required: &'static str,
    pub data_type: &'static str,
    pub header: &'static str,
    pub parameter: &'static str,
    pub validation: &'static str,
    pub example_response: &'static str,
    pub error_code: &'static str,
    pub http_code: &'static str,

    // Endpoint subsection
    pub description_label: &'static str,
    pub url: &'static str,
    pub http_method: &'static str,
    pub needs_token: &'static str,
    pub usage: &'static str,
    pub yes: &'static str,
    pub no: &'static str,
    pub header_parameters: &'static str,
    pub query_parameters: &'static str,
    pub body_parameters: &'static str,
    pub body_type: &'static str,
    pub http_codes: &'static str,
    pub response: &'static str,
    pub response_empty: &'static str,
    pub curl: &'static str,
}

impl Labels {
    /// Preset for a language.
    pub fn for_language(language: Language) -> &'static Labels {
        match language {
            Language::English => &ENGLISH,
            Language::Persian => &PERSIAN,
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        ENGLISH.clone()
    }
}

/// English preset.
pub static ENGLISH: Labels = Labels {
    right_to_left: false,
    document_title: "API Documentation",
    intro_text: "Introduction",
    toc_title: "Table of Contents",
    toc_placeholder: "Right-click to update the table of contents.",
    info_title: "General Information",
    intro_title: "Introduction",
    index_title: "Method Index",
    changelog_title: "Change Log",
    shared_model_title: "Shared Response Model",
    shared_errors_title: "Shared Errors",
    endpoints_title: "Endpoints",

    info_name: "Title",
    info_base_url: "Base URL",
    info_version: "Version",
    info_api_type: "API Type",
    info_api_type_value: "REST / JSON",
    info_rate_limiting: "Rate limiting",
    info_usage: "Usage",
    info_release_date: "Release date",
    info_limitations: "Limitations",

    address: "Address",
    method: "Method",
    summary: "Summary",
    description: "Description",
    row: "Row",
    version: "Version",
    date: "Date",
    developer: "Developer",
    notes: "Change notes",
    field: "Field",
    explanation: "Explanation",
    example: "Example",
    required: "Required",
    data_type: "Data type",
    header: "Header",
    parameter: "Parameter",
    validation: "Validation",
    example_response: "Example Response",
    error_code: "Error Code",
    http_code: "HTTP Code",

    description_label: "Description:",
    url: "URL",
    http_method: "HTTP Method",
    needs_token: "Needs token",
    usage: "Usage",
    yes: "Yes",
    no: "No",
    header_parameters: "Header Parameters:",
    query_parameters: "Query Parameters:",
    body_parameters: "Body Parameters:",
    body_type: "Body Type:",
    http_codes: "HTTP Code:",
    response: "Response",
    response_empty: "Response:",
    curl: "Curl:",
};

/// Persian preset.
pub static PERSIAN: Labels = Labels {
    right_to_left: true,
    document_title: "API Documentation",
    intro_text: "مقدمه مستند",
    toc_title: "فهرست مطالب",
    toc_placeholder: " Word Update .....",
    info_title: "اطلاعات کلی",
    intro_title: "مقدمه مستند",
    index_title: "فهرست متدها (Index)",
    changelog_title: "لیست تغییرات (Change Log)",
    shared_model_title: "مدل خروجی مشترک",
    shared_errors_title: "مدل خروجی خطا",
    endpoints_title: "Endpoints",

    info_name: "عنوان",
    info_base_url: "Base URL",
    info_version: "نسخه",
    info_api_type: "API Type",
    info_api_type_value: "REST / JSON",
    info_rate_limiting: "Rate limiting",
    info_usage: "کاربرد",
    info_release_date: "تاریخ انتشار",
    info_limitations: "محدودیت ها",

    address: "آدرس",
    method: "متد",
    summary: "خلاصه",
    description: "توضیحات",
    row: "ردیف",
    version: "نسخه",
    date: "تاریخ",
    developer: "توسعه‌دهنده",
    notes: "توضیحات تغییر",
    field: "فیلد",
    explanation: "توضیح",
    example: "مثال",
    required: "الزامی",
    data_type: "نوع داده",
    header: "Header",
    parameter: "پارامتر",
    validation: "Validation",
    example_response: "مثال Response",
    error_code: "Error Code",
    http_code: "HTTP Code",

    description_label: "توضیحات :",
    url: "مسیر (URL)",
    http_method: "HTTP Method",
    needs_token: "نیاز به توکن",
    usage: "کاربرد",
    yes: "بله",
    no: "خیر",
    header_parameters: "Header Parameters:",
    query_parameters: "Query Parameters:",
    body_parameters: "Body Parameters:",
    body_type: "Body Type:",
    http_codes: "HTTP Code:",
    response: "Response",
    response_empty: "Response:",
    curl: "Curl:",
};
