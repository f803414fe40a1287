//! Kudos Service
//!
//! Kudos have no persisted effect; the service only checks the request and
//! suggests a pay-it-forward offer.

use futurebank_core::dto::kudos::{KudosReceipt, KudosRequest};
use futurebank_core::features::FeatureFlags;
use futurebank_core::kudos::{UnknownKudos, pay_it_forward, validate_kudos};

/// Service error type
#[derive(Debug, PartialEq, Eq)]
pub enum KudosError {
    Disabled,
    UnknownKudos(String),
}

/// Give kudos for a completed exchange
pub fn give_kudos(flags: &FeatureFlags, req: KudosRequest) -> Result<KudosReceipt, KudosError> {
    if !flags.enable_kudos_system {
        return Err(KudosError::Disabled);
    }

    if let Err(UnknownKudos(label)) = validate_kudos(&req.kudos) {
        return Err(KudosError::UnknownKudos(label));
    }

    let pay_it_forward = pay_it_forward(&req.exchange, flags);

    tracing::info!(
        "Kudos '{}' given for '{}' (pay it forward: {})",
        req.kudos,
        req.exchange.title,
        pay_it_forward.is_some()
    );

    Ok(KudosReceipt {
        kudos: req.kudos,
        pay_it_forward,
    })
}
