//! Bulk import of questionnaire responses exported from the intake web form.

mod normalizer;
mod parser;

use crate::workflows::relief::QuestionnaireSubmission;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum WebformImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for WebformImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WebformImportError::Io(err) => write!(f, "failed to read web form export: {}", err),
            WebformImportError::Csv(err) => write!(f, "invalid web form CSV data: {}", err),
        }
    }
}

impl std::error::Error for WebformImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WebformImportError::Io(err) => Some(err),
            WebformImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for WebformImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for WebformImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct WebformResponseImporter;

impl WebformResponseImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<QuestionnaireSubmission>, WebformImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<QuestionnaireSubmission>, WebformImportError> {
        Ok(parser::parse_records(reader)?)
    }
}
