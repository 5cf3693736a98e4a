#![allow(missing_docs)]

pub(crate) mod db;
pub(crate) mod http;

pub(crate) use db::must_create_test_state;
pub(crate) use http::{assert_content_type, assert_status, get_header, parse_json_body};
