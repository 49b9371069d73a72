//! Module for reading FluxML documents and reading/writing their JSON forms
pub mod fluxml_parse;
pub mod json;
