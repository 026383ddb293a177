#![doc = include_str!("../README.md")]
#![deny(
    // The following are allowed by default lints according to
    // https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html

    absolute_paths_not_starting_with_crate,
    // box_pointers, async trait must use it
    // elided_lifetimes_in_paths,  // allow anonymous lifetime
    explicit_outlives_requirements,
    keyword_idents,
    macro_use_extern_crate,
    meta_variable_misuse,
    missing_abi,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    // must_not_suspend, unstable
    non_ascii_idents,
    // non_exhaustive_omitted_patterns, unstable
    noop_method_call,
    rust_2021_incompatible_closure_captures,
    rust_2021_incompatible_or_patterns,
    rust_2021_prefixes_incompatible_syntax,
    rust_2021_prelude_collisions,
    single_use_lifetimes,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unsafe_op_in_unsafe_fn,
    unstable_features,
    // unused_crate_dependencies, the false positive case blocks us
    unused_extern_crates,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications,
    unused_results,
    variant_size_differences,

    warnings, // treat all warnings as errors

    clippy::all,
    clippy::pedantic,
    clippy::cargo,

    // The followings are selected restriction lints for rust 1.57
    clippy::as_conversions,
    clippy::clone_on_ref_ptr,
    clippy::create_dir,
    clippy::dbg_macro,
    clippy::decimal_literal_representation,
    // clippy::default_numeric_fallback, too verbose when dealing with numbers
    clippy::disallowed_script_idents,
    clippy::else_if_without_else,
    clippy::exhaustive_enums,
    clippy::exhaustive_structs,
    clippy::exit,
    clippy::expect_used,
    clippy::filetype_is_file,
    clippy::float_arithmetic,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::if_then_some_else_none,
    // clippy::implicit_return, it's idiomatic Rust code.
    clippy::indexing_slicing,
    // clippy::inline_asm_x86_att_syntax, stick to intel syntax
    clippy::inline_asm_x86_intel_syntax,
    clippy::arithmetic_side_effects,
    // clippy::integer_division, required in the project
    clippy::let_underscore_must_use,
    clippy::lossy_float_literal,
    clippy::map_err_ignore,
    clippy::mem_forget,
    clippy::missing_docs_in_private_items,
    clippy::missing_enforced_import_renames,
    clippy::missing_inline_in_public_items,
    // clippy::mod_module_files, mod.rs file is used
    clippy::modulo_arithmetic,
    clippy::multiple_inherent_impl,
    // clippy::panic, allow in application code
    // clippy::panic_in_result_fn, not necessary as panic is banned
    clippy::pattern_type_mismatch,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::rc_buffer,
    clippy::rc_mutex,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::same_name_method,
    clippy::self_named_module_files,
    // clippy::shadow_reuse, it’s a common pattern in Rust code
    // clippy::shadow_same, it’s a common pattern in Rust code
    clippy::shadow_unrelated,
    clippy::str_to_string,
    clippy::string_add,
    clippy::string_to_string,
    clippy::todo,
    clippy::unimplemented,
    clippy::unnecessary_self_imports,
    clippy::unneeded_field_pattern,
    // clippy::unreachable, allow unreachable panic, which is out of expectation
    clippy::unwrap_in_result,
    clippy::unwrap_used,
    // clippy::use_debug, debug is allow for debug log
    clippy::verbose_file_reads,
    clippy::wildcard_enum_match_arm,

    // The followings are selected lints from 1.61.0 to 1.67.1
    clippy::as_ptr_cast_mut,
    clippy::derive_partial_eq_without_eq,
    clippy::empty_drop,
    clippy::empty_structs_with_brackets,
    clippy::format_push_string,
    clippy::iter_on_empty_collections,
    clippy::iter_on_single_items,
    clippy::large_include_file,
    clippy::manual_clamp,
    clippy::suspicious_xor_used_as_pow,
    clippy::unnecessary_safety_comment,
    clippy::unnecessary_safety_doc,
    clippy::unused_peekable,
    clippy::unused_rounding,

    // The followings are selected restriction lints from rust 1.68.0 to 1.71.0
    // clippy::allow_attributes, still unstable
    clippy::impl_trait_in_params,
    clippy::let_underscore_untyped,
    clippy::missing_assert_message,
    clippy::multiple_unsafe_ops_per_block,
    clippy::semicolon_inside_block,
    // clippy::semicolon_outside_block, already used `semicolon_inside_block`
    clippy::tests_outside_test_module,
    // 1.71.0
    clippy::default_constructed_unit_structs,
    clippy::items_after_test_module,
    clippy::manual_next_back,
    clippy::manual_while_let_some,
    clippy::needless_bool_assign,
    clippy::non_minimal_cfg,
)]
#![allow(
    clippy::multiple_crate_versions, // caused by the dependency, can't be fixed
    clippy::module_name_repetitions, // It will be more easy to use for the type name prefixed by module name
)]
#![cfg_attr(
    test,
    allow(
        clippy::indexing_slicing,
        unused_results,
        clippy::unwrap_used,
        clippy::as_conversions,
        clippy::shadow_unrelated,
        clippy::arithmetic_side_effects
    )
)]
use std::{
    str::FromStr,
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};

use http::{header::AUTHORIZATION, HeaderValue, Request};
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};
use tower::Service;
use tracing::debug;

use crate::{clients::AuthClient, error::QuarkClientBuildError};

/// Sub-clients for each type of API
pub mod clients;
/// Request type definitions.
pub mod types;

/// Error definitions for `quark-client`.
pub mod error;

/// The default deadline for requests issued during connection setup
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// The default bound on establishing a connection to a single endpoint
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Quark client
#[derive(Clone, Debug)]
pub struct Client {
    /// Auth client
    auth: AuthClient,
    /// The endpoint addresses the client was configured with, in order
    endpoints: Vec<String>,
}

impl Client {
    /// New `Client`
    ///
    /// # Errors
    ///
    /// If no endpoint is given, if `Self::build_channel` fails, or if
    /// authenticating the configured user fails.
    #[inline]
    pub async fn connect<E, S>(
        all_members: S,
        options: ClientOptions,
    ) -> Result<Self, QuarkClientBuildError>
    where
        E: AsRef<str>,
        S: IntoIterator<Item = E>,
    {
        let addrs: Vec<_> = all_members
            .into_iter()
            .map(|addr| addr.as_ref().to_owned())
            .collect();
        if addrs.is_empty() {
            return Err(QuarkClientBuildError::invalid_arguments(
                "no endpoint is provided",
            ));
        }
        let channel = Self::build_channel(
            addrs.clone(),
            options.tls_config.as_ref(),
            options.connect_timeout,
        )
        .await?;

        let token = match options.user {
            Some((username, password)) => {
                let mut tmp_auth = AuthClient::new(channel.clone(), None);
                let resp = tmp_auth
                    .authenticate(
                        types::auth::AuthenticateRequest::new(username, password),
                        DEFAULT_REQUEST_TIMEOUT,
                    )
                    .await
                    .map_err(|err| QuarkClientBuildError::AuthError(err.to_string()))?;

                Some(resp.token)
            }
            None => None,
        };

        let auth = AuthClient::new(channel, token);

        Ok(Self {
            auth,
            endpoints: addrs,
        })
    }

    /// Build a tonic load balancing channel.
    async fn build_channel(
        addrs: Vec<String>,
        tls_config: Option<&ClientTlsConfig>,
        connect_timeout: Duration,
    ) -> Result<Channel, QuarkClientBuildError> {
        let (channel, tx) = Channel::balance_channel(64);

        for addr in addrs {
            let endpoint = build_endpoint(&addr, tls_config, connect_timeout)?;
            tx.send(tower::discover::Change::Insert(addr, endpoint))
                .await
                .unwrap_or_else(|_| unreachable!("The channel will not closed"));
        }

        Ok(channel)
    }

    /// Gets an auth client.
    #[inline]
    #[must_use]
    pub fn auth_client(&self) -> AuthClient {
        self.auth.clone()
    }

    /// The endpoint addresses the client was configured with, in the order
    /// they were given. Intended for diagnostic display only.
    #[inline]
    #[must_use]
    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }
}

/// Options for a client connection
#[derive(Clone, Debug)]
pub struct ClientOptions {
    /// User is a pair values of name and password
    user: Option<(String, String)>,
    /// Client tls config
    tls_config: Option<ClientTlsConfig>,
    /// Bound on establishing a connection to a single endpoint
    connect_timeout: Duration,
}

impl Default for ClientOptions {
    #[inline]
    fn default() -> Self {
        Self {
            user: None,
            tls_config: None,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl ClientOptions {
    /// Create a new `ClientOptions`
    #[inline]
    #[must_use]
    pub fn new(
        user: Option<(String, String)>,
        tls_config: Option<ClientTlsConfig>,
        connect_timeout: Duration,
    ) -> Self {
        Self {
            user,
            tls_config,
            connect_timeout,
        }
    }

    /// Get `user`
    #[inline]
    #[must_use]
    pub fn user(&self) -> Option<(String, String)> {
        self.user.clone()
    }

    /// Get `tls_config`
    #[inline]
    #[must_use]
    pub fn tls_config(&self) -> Option<&ClientTlsConfig> {
        self.tls_config.as_ref()
    }

    /// Get `connect_timeout`
    #[inline]
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Set `user`
    #[inline]
    #[must_use]
    pub fn with_user(self, name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: Some((name.into(), password.into())),
            ..self
        }
    }

    /// Set `tls_config`
    #[inline]
    #[must_use]
    pub fn with_tls_config(self, tls_config: ClientTlsConfig) -> Self {
        Self {
            tls_config: Some(tls_config),
            ..self
        }
    }

    /// Set `connect_timeout`
    #[inline]
    #[must_use]
    pub fn with_connect_timeout(self, connect_timeout: Duration) -> Self {
        Self {
            connect_timeout,
            ..self
        }
    }
}

/// Authentication service.
#[derive(Debug, Clone)]
struct AuthService<S> {
    /// A `Service` trait object
    inner: S,
    /// Auth token
    token: Option<Arc<HeaderValue>>,
}

impl<S> AuthService<S> {
    /// Create a new `AuthService`
    #[inline]
    fn new(inner: S, token: Option<Arc<HeaderValue>>) -> Self {
        Self { inner, token }
    }
}

impl<S, Body, Response> Service<Request<Body>> for AuthService<S>
where
    S: Service<Request<Body>, Response = Response>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    #[inline]
    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    #[inline]
    fn call(&mut self, mut request: Request<Body>) -> Self::Future {
        if let Some(token) = self.token.as_ref() {
            let _: Option<HeaderValue> = request
                .headers_mut()
                .insert(AUTHORIZATION, token.as_ref().clone());
        }

        self.inner.call(request)
    }
}

/// Create a new endpoint from addr
///
/// # Errors
///
/// Return error if addr or tls config is invalid
fn build_endpoint(
    addr: &str,
    tls_config: Option<&ClientTlsConfig>,
    connect_timeout: Duration,
) -> Result<Endpoint, tonic::transport::Error> {
    debug!(
        "connect to {addr}{}",
        if tls_config.is_some() {
            " with tls_config"
        } else {
            ""
        }
    );
    let scheme_str = addr.split_once("://").map(|(scheme, _)| scheme);
    let endpoint = match scheme_str {
        Some(_scheme) => Endpoint::from_str(addr)?,
        None => Endpoint::from_shared(format!("http://{addr}"))?,
    };
    let endpoint = endpoint.connect_timeout(connect_timeout);
    match scheme_str {
        Some("http") | None => {}
        Some("https") => {
            let tls_config = tls_config.cloned().unwrap_or_default();
            return endpoint.tls_config(tls_config);
        }
        _ => {
            if let Some(tls_config) = tls_config {
                return endpoint.tls_config(tls_config.clone());
            }
        }
    };
    Ok(endpoint)
}
