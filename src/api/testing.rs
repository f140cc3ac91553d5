//
//  bitbucket-lite
//  api/testing.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Recording transport used by the unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use serde_json::{json, Value};

use super::common::ApiError;
use super::transport::Transport;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Call {
    pub url: String,
    pub query: Vec<(String, String)>,
}

/// Replays queued responses in order and records every request.
#[derive(Default)]
pub(crate) struct StubTransport {
    responses: RefCell<VecDeque<Result<Value, ApiError>>>,
    calls: RefCell<Vec<Call>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, body: Value) -> Self {
        self.responses.borrow_mut().push_back(Ok(body));
        self
    }

    pub fn with_error(self, error: ApiError) -> Self {
        self.responses.borrow_mut().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.url.clone()).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Transport for StubTransport {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<Value, ApiError> {
        self.calls.borrow_mut().push(Call {
            url: url.to_string(),
            query: query.to_vec(),
        });

        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request to {url}"))
    }
}

/// Builds a list envelope.
pub(crate) fn page(values: Value, next: Option<&str>) -> Value {
    match next {
        Some(next) => json!({"values": values, "next": next, "pagelen": 10}),
        None => json!({"values": values, "pagelen": 10}),
    }
}
