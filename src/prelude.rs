//! Prelude module for convenient imports.
//!
//! ```rust
//! use auth0_management::prelude::*;
//! ```
//!
//! This provides access to:
//! - Core client types
//! - Error types
//! - Authentication types
//! - Guardian and Hooks request and resource types

pub use crate::{
    auth::{BearerCredentialsConfig, ClientCredentialsConfig, Credentials, CredentialsProvider},
    client::{Client, ClientBuilder},
    config::{RetryConfig, TlsConfig},
    error::{Error, ErrorKind, Result},
    guardian::{
        CreateEnrollmentTicket, Enrollment, EnrollmentStatus, EnrollmentTicket, GuardianClient,
        MultiFactor, MultiFactorDuoSettings, MultiFactorPolicies, MultiFactorPolicy,
        MultiFactorProvider, MultiFactorProviderAmazonSns, MultiFactorProviderTwilio,
        MultiFactorSmsTemplate, MultiFactorWebAuthnSettings, PhoneMessageType, PhoneMessageTypes,
        PhoneProvider, UserVerification,
    },
    hooks::{
        CreateHookRequest, Hook, HookList, HookSecrets, HooksClient, UpdateHookRequest,
        VALUE_NOT_SHOWN,
    },
};
