//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::files::{MAX_REVIEW_FILE_SIZE, read_bounded, read_file};
use crate::host::Host;
use crate::review::{AdmissionResponse, AdmissionReview};
use podready_core::AdmissionError;
use std::path::Path;

fn print_json(value: &impl serde::Serialize) -> Result<(), AdmissionError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| AdmissionError::SerializationError(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

// =============================================================================
// ADMIT COMMAND
// =============================================================================

/// Run one admission review and print the response review.
///
/// A denied request still prints its response; the admission error is then
/// returned so the process exits non-zero.
pub fn cmd_admit(host: &Host, file: &Path) -> Result<(), AdmissionError> {
    let bytes = if file == Path::new("-") {
        read_bounded(std::io::stdin().lock(), MAX_REVIEW_FILE_SIZE)?
    } else {
        read_file(file, MAX_REVIEW_FILE_SIZE)?
    };
    let request = AdmissionReview::request_from_slice(&bytes)?;

    tracing::info!(
        uid = %request.uid,
        operation = %request.operation,
        resource = %request.resource,
        namespace = %request.namespace,
        name = %request.name,
        "admitting request"
    );

    let (uid, mut attributes) = request.into_attributes();
    let outcome = host.chain.admit(&mut attributes);
    let response = AdmissionResponse::from_outcome(uid, &outcome, attributes.into_object());

    print_json(&AdmissionReview::from_response(response))?;
    outcome
}

// =============================================================================
// FEATURES COMMAND
// =============================================================================

/// Show known feature gates.
pub fn cmd_features(host: &Host, json_mode: bool) -> Result<(), AdmissionError> {
    let features = host.features.features();

    if json_mode {
        let output: Vec<_> = features
            .iter()
            .map(|(feature, spec, enabled)| {
                serde_json::json!({
                    "name": feature.name(),
                    "pre_release": spec.pre_release,
                    "default": spec.default,
                    "locked": spec.lock_to_default,
                    "enabled": enabled,
                })
            })
            .collect();
        return print_json(&output);
    }

    println!("Feature Gates");
    println!("=============");
    for (feature, spec, enabled) in features {
        println!(
            "{:<24} {:<10} default={:<5} enabled={}",
            feature.name(),
            spec.pre_release,
            spec.default,
            enabled
        );
    }
    Ok(())
}

// =============================================================================
// PLUGINS COMMAND
// =============================================================================

/// Show registered plugins and the enabled chain.
pub fn cmd_plugins(host: &Host, json_mode: bool) -> Result<(), AdmissionError> {
    let registered = host.plugins.registered();
    let enabled = host.chain.names();

    if json_mode {
        let output = serde_json::json!({
            "registered": registered,
            "enabled": enabled,
        });
        return print_json(&output);
    }

    println!("Admission Plugins");
    println!("=================");
    for name in &registered {
        let marker = if enabled.contains(&name.as_str()) {
            "enabled"
        } else {
            "disabled"
        };
        println!("{:<24} {}", name, marker);
    }
    println!();
    println!("Chain: {}", enabled.join(" -> "));
    Ok(())
}
