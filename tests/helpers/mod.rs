// ABOUTME: Shared helper modules for integration tests
// ABOUTME: HTTP harness for exercising axum routers without a server

pub mod axum_test;
