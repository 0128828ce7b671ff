//! Response envelopes.

use serde::Serialize;

use crate::model::{Data, ModelReference, TechReference};

/// Message returned after a create.
pub const CREATED_MESSAGE: &str = "Data created successfully";
/// Message returned after an update.
pub const UPDATED_MESSAGE: &str = "Data updated successfully";
/// Message returned after a delete.
pub const DELETED_MESSAGE: &str = "Data deleted successfully";
/// Message returned when no record has the requested code.
pub const NOT_FOUND_MESSAGE: &str = "Data not found";
/// Message returned when a body cannot be bound.
pub const INVALID_MESSAGE: &str = "Invalid data";

/// Record list response
#[derive(Debug, Serialize)]
pub struct DataList {
    /// Records, in store order.
    pub data: Vec<Data>,
}

/// Single record with a message, for writes
#[derive(Debug, Serialize)]
pub struct DataMessage {
    /// Outcome message.
    pub message: &'static str,
    /// The record as stored.
    pub data: Data,
}

/// Bare message response
#[derive(Debug, Serialize)]
pub struct Message {
    /// Outcome message.
    pub message: &'static str,
}

/// Client error response
#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    /// Fixed summary.
    pub message: &'static str,
    /// Decoder detail.
    pub error: String,
}

/// Model reference table response
#[derive(Debug, Serialize)]
pub struct ModelList {
    /// Model reference entries.
    pub models: Vec<ModelReference>,
}

/// Tech reference table response
#[derive(Debug, Serialize)]
pub struct TechList {
    /// Tech reference entries.
    pub techs: Vec<TechReference>,
}
