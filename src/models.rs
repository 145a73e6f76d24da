//! Run record data models
//!
//! These types mirror the JSON run record produced by an audit run. They are
//! read-only inputs to the classifier and scorer: nothing in this crate
//! mutates a loaded [`Lhr`]. Callers that want to experiment (for example,
//! forcing every score to zero) should `clone()` first.
//!
//! Every struct keeps unrecognised fields in an `extra` map so a record can
//! be loaded and written back without losing data.

use crate::error::{ReportError, ReportResult};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::path::Path;

/// Fields the schema does not model explicitly, preserved verbatim
pub type Extra = Map<String, Value>;

/// Audit id -> audit result
pub type AuditMap = IndexMap<String, AuditResult>;

/// Group id -> group metadata
pub type GroupMap = IndexMap<String, CategoryGroup>;

/// How an audit's score is meant to be displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ScoreDisplayMode {
    #[default]
    Binary,
    Numeric,
    Informative,
    NotApplicable,
    Manual,
    Error,
}

/// A field that may be missing, explicitly `null`, or hold a value.
///
/// Run records distinguish the first two, and writing a record back must
/// keep them apart, so `Option<T>` is not enough. Pair with
/// `#[serde(default, skip_serializing_if = "Nullable::is_absent")]`.
#[derive(Debug, Clone, PartialEq)]
pub enum Nullable<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Default for Nullable<T> {
    fn default() -> Self {
        Nullable::Absent
    }
}

impl<T> Nullable<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Nullable::Absent)
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Nullable::Value(value) => Some(value),
            Nullable::Absent | Nullable::Null => None,
        }
    }
}

impl<T: Copy> Nullable<T> {
    pub fn value(&self) -> Option<T> {
        self.get().copied()
    }
}

impl<T> From<Option<T>> for Nullable<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Nullable::Null, Nullable::Value)
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Nullable::Value(value) => value.serialize(serializer),
            Nullable::Absent | Nullable::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Nullable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Nullable::from)
    }
}

/// The outcome of a single audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Score in [0, 1]; null means "not scored"
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub score: Nullable<f64>,
    #[serde(default)]
    pub score_display_mode: ScoreDisplayMode,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub display_value: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub explanation: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub error_message: Nullable<String>,
    /// Opaque, audit-specific payload (tables, opportunities, ...)
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub details: Nullable<Value>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub warnings: Nullable<Vec<String>>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub numeric_value: Nullable<f64>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl AuditResult {
    /// The score if it is present and finite
    pub fn finite_score(&self) -> Option<f64> {
        self.score.value().filter(|s| s.is_finite())
    }

    /// Finite score that lies outside [0, 1], if any
    pub fn out_of_range_score(&self) -> Option<f64> {
        self.finite_score().filter(|s| !(0.0..=1.0).contains(s))
    }

    /// Warnings attached to this audit (empty when absent or null)
    pub fn warnings(&self) -> &[String] {
        self.warnings.get().map_or(&[], Vec::as_slice)
    }
}

/// A category's reference to an audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AuditRef {
    pub id: String,
    #[serde(default)]
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl AuditRef {
    pub fn new(id: impl Into<String>, weight: f64) -> Self {
        Self {
            id: id.into(),
            weight,
            ..Default::default()
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

/// Display metadata for a group of audits inside a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGroup {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A scored category and its ordered audit references
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LhrCategory {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub score: Nullable<f64>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub manual_description: Nullable<String>,
    #[serde(default)]
    pub audit_refs: Vec<AuditRef>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// An audit reference paired with the audit result it points at
#[derive(Debug, Clone, Copy)]
pub struct ResolvedAudit<'a> {
    pub audit_ref: &'a AuditRef,
    pub result: &'a AuditResult,
}

impl LhrCategory {
    /// Resolve every audit reference against `audits`, in presentation order.
    ///
    /// Fails on the first dangling reference.
    pub fn resolve<'a>(&'a self, audits: &'a AuditMap) -> ReportResult<Vec<ResolvedAudit<'a>>> {
        self.audit_refs
            .iter()
            .map(|audit_ref| {
                audits
                    .get(&audit_ref.id)
                    .map(|result| ResolvedAudit { audit_ref, result })
                    .ok_or_else(|| ReportError::UnknownAudit {
                        category: self.id.clone(),
                        audit: audit_ref.id.clone(),
                    })
            })
            .collect()
    }

    /// Check that every group id used by this category exists in `groups`
    pub fn check_groups(&self, groups: &GroupMap) -> ReportResult<()> {
        for audit_ref in &self.audit_refs {
            let Some(group) = &audit_ref.group else {
                continue;
            };
            if !groups.contains_key(group) {
                return Err(ReportError::UnknownGroup {
                    category: self.id.clone(),
                    audit: audit_ref.id.clone(),
                    group: group.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Runtime error codes a run can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuntimeErrorCode {
    NoError,
    UnknownError,
    NoSpeedlineFrames,
    SpeedindexOfZero,
    NoScreenshots,
    InvalidSpeedline,
    NoTracingStarted,
    NoNavstart,
    NoFcp,
    NoDcl,
    NoResourceRequest,
    FailedDocumentRequest,
    ErroredDocumentRequest,
    TracingAlreadyStarted,
    ParsingProblem,
    ReadFailed,
    InsecureDocumentRequest,
    ProtocolTimeout,
    PageHung,
    DnsFailure,
    CriTimeout,
}

impl RuntimeErrorCode {
    pub const ALL: [RuntimeErrorCode; 21] = [
        RuntimeErrorCode::NoError,
        RuntimeErrorCode::UnknownError,
        RuntimeErrorCode::NoSpeedlineFrames,
        RuntimeErrorCode::SpeedindexOfZero,
        RuntimeErrorCode::NoScreenshots,
        RuntimeErrorCode::InvalidSpeedline,
        RuntimeErrorCode::NoTracingStarted,
        RuntimeErrorCode::NoNavstart,
        RuntimeErrorCode::NoFcp,
        RuntimeErrorCode::NoDcl,
        RuntimeErrorCode::NoResourceRequest,
        RuntimeErrorCode::FailedDocumentRequest,
        RuntimeErrorCode::ErroredDocumentRequest,
        RuntimeErrorCode::TracingAlreadyStarted,
        RuntimeErrorCode::ParsingProblem,
        RuntimeErrorCode::ReadFailed,
        RuntimeErrorCode::InsecureDocumentRequest,
        RuntimeErrorCode::ProtocolTimeout,
        RuntimeErrorCode::PageHung,
        RuntimeErrorCode::DnsFailure,
        RuntimeErrorCode::CriTimeout,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuntimeErrorCode::NoError => "NO_ERROR",
            RuntimeErrorCode::UnknownError => "UNKNOWN_ERROR",
            RuntimeErrorCode::NoSpeedlineFrames => "NO_SPEEDLINE_FRAMES",
            RuntimeErrorCode::SpeedindexOfZero => "SPEEDINDEX_OF_ZERO",
            RuntimeErrorCode::NoScreenshots => "NO_SCREENSHOTS",
            RuntimeErrorCode::InvalidSpeedline => "INVALID_SPEEDLINE",
            RuntimeErrorCode::NoTracingStarted => "NO_TRACING_STARTED",
            RuntimeErrorCode::NoNavstart => "NO_NAVSTART",
            RuntimeErrorCode::NoFcp => "NO_FCP",
            RuntimeErrorCode::NoDcl => "NO_DCL",
            RuntimeErrorCode::NoResourceRequest => "NO_RESOURCE_REQUEST",
            RuntimeErrorCode::FailedDocumentRequest => "FAILED_DOCUMENT_REQUEST",
            RuntimeErrorCode::ErroredDocumentRequest => "ERRORED_DOCUMENT_REQUEST",
            RuntimeErrorCode::TracingAlreadyStarted => "TRACING_ALREADY_STARTED",
            RuntimeErrorCode::ParsingProblem => "PARSING_PROBLEM",
            RuntimeErrorCode::ReadFailed => "READ_FAILED",
            RuntimeErrorCode::InsecureDocumentRequest => "INSECURE_DOCUMENT_REQUEST",
            RuntimeErrorCode::ProtocolTimeout => "PROTOCOL_TIMEOUT",
            RuntimeErrorCode::PageHung => "PAGE_HUNG",
            RuntimeErrorCode::DnsFailure => "DNS_FAILURE",
            RuntimeErrorCode::CriTimeout => "CRI_TIMEOUT",
        }
    }
}

impl std::fmt::Display for RuntimeErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run-level failure reported by the audit runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeError {
    pub code: RuntimeErrorCode,
    #[serde(default)]
    pub message: String,
}

impl RuntimeError {
    /// Whether this block describes an actual failure
    pub fn is_error(&self) -> bool {
        self.code != RuntimeErrorCode::NoError
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    #[serde(default)]
    pub network_user_agent: String,
    #[serde(default)]
    pub host_user_agent: String,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub benchmark_index: Nullable<f64>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Device form factor the run emulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormFactor {
    #[default]
    Unspecified,
    Mobile,
    Desktop,
    #[serde(rename = "none")]
    NoEmulation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSettings {
    #[serde(default)]
    pub emulated_form_factor: FormFactor,
    #[serde(default)]
    pub locale: String,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub only_categories: Nullable<Vec<String>>,
    #[serde(default)]
    pub channel: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Pre-localized strings used by presentation adapters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RendererStrings {
    pub variance_disclaimer: String,
    pub opportunity_resource_column_label: String,
    pub opportunity_savings_column_label: String,
    pub error_missing_audit_info: String,
    pub error_label: String,
    pub warning_header: String,
    pub audit_group_expand_tooltip: String,
    pub passed_audits_group_title: String,
    pub not_applicable_audits_group_title: String,
    pub manual_audits_group_title: String,
    pub warning_audits_group_title: String,
    pub toplevel_warnings_message: String,
    pub scorescale_label: String,
    pub crc_initial_navigation: String,
    pub crc_longest_duration_label: String,
    pub ls_performance_category_description: String,
    pub lab_data_title: String,
    pub snippet_expand_button_label: String,
    pub snippet_collapse_button_label: String,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct I18n {
    #[serde(default)]
    pub renderer_formatted_strings: RendererStrings,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TimingEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub entry_type: String,
    #[serde(default)]
    pub start_time: f64,
    #[serde(default)]
    pub duration: f64,
    /// Set on entries captured while collecting page data
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub gather: Nullable<bool>,
    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Timing {
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub entries: Vec<TimingEntry>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Framework-specific advice contributed by a third party
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StackPack {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, rename = "iconDataURL")]
    pub icon_data_url: String,
    /// Audit id -> localized description
    #[serde(default)]
    pub descriptions: IndexMap<String, String>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A complete run record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Lhr {
    #[serde(default)]
    pub fetch_time: String,
    #[serde(default)]
    pub requested_url: String,
    #[serde(default)]
    pub final_url: String,
    #[serde(default)]
    pub lighthouse_version: String,
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub user_agent: String,
    #[serde(default)]
    pub run_warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub runtime_error: Nullable<RuntimeError>,
    #[serde(default)]
    pub audits: AuditMap,
    #[serde(default)]
    pub categories: IndexMap<String, LhrCategory>,
    #[serde(default)]
    pub category_groups: GroupMap,
    #[serde(default)]
    pub config_settings: ConfigSettings,
    #[serde(default)]
    pub i18n: I18n,
    #[serde(default)]
    pub timing: Timing,
    #[serde(default)]
    pub stack_packs: Vec<StackPack>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl Lhr {
    pub fn from_json_str(json: &str) -> ReportResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a run record from a JSON file
    pub fn load(path: &Path) -> ReportResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn to_json_string(&self) -> ReportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn category(&self, id: &str) -> ReportResult<&LhrCategory> {
        self.categories
            .get(id)
            .ok_or_else(|| ReportError::UnknownCategory(id.to_string()))
    }

    /// Check that every audit and group reference in every category resolves
    pub fn validate(&self) -> ReportResult<()> {
        for category in self.categories.values() {
            category.resolve(&self.audits)?;
            category.check_groups(&self.category_groups)?;
        }
        Ok(())
    }
}
