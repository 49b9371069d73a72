//! This module provides the Info record, the metadata of a FluxML document
use chrono::NaiveDateTime;
use serde::Serialize;

/// Document metadata, every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Info {
    pub name: Option<String>,
    pub version: Option<String>,
    /// Creation date, written as `YYYY-MM-DD HH:MM:SS`
    pub date: Option<NaiveDateTime>,
    pub comment: Option<String>,
    /// Decoded base64 signature
    pub signature: Option<Vec<u8>>,
    pub modeler: Option<String>,
    pub strain: Option<String>,
}
