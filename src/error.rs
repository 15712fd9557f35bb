// Copyright (c) 2025 Pocketledger contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failure modes of a remote read. Field-level shape mismatches are not
/// errors; the tolerant decoder absorbs those with defaults.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("endpoint returned an HTML error page instead of JSON")]
    HtmlErrorPage,
    #[error("endpoint returned an empty body")]
    EmptyBody,
    #[error("decode error ({context})")]
    Decode { context: String },
    #[error("HTTP {code}: {body}")]
    HttpStatus { code: u16, body: String },
}

impl SyncError {
    pub fn decode(context: impl Into<String>) -> Self {
        SyncError::Decode {
            context: context.into(),
        }
    }
}
