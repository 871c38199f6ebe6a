#![allow(clippy::expect_used)]

mod common;
mod http_test;
mod scenarios_test;
