// ABOUTME: Configuration module root
// ABOUTME: Environment-based server configuration
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

/// Environment-based configuration management
pub mod environment;

pub use environment::ServerConfig;
