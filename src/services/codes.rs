//! Short unique card codes.
//!
//! A code is [`PREFIX`] followed by random characters from [`ALPHABET`].
//! Every call starts at the configured length with the configured attempt
//! budget. When every attempt at a length collides, the budget doubles and
//! the length grows by one. The search has no upper bound.

use crate::config::CodesConfig;
use crate::constants::codes::{ALPHABET, PREFIX};
use crate::db::{CardStore, StoreError};
use rand::Rng;
use std::collections::HashSet;
use tracing::debug;

/// Random string of `length` characters drawn from [`ALPHABET`].
#[must_use]
pub fn random_code<R: Rng>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
        .collect()
}

/// Whether `code` has the shape of a generated card code.
#[must_use]
pub fn is_well_formed(code: &str) -> bool {
    code.strip_prefix(PREFIX).is_some_and(|suffix| {
        !suffix.is_empty() && suffix.bytes().all(|b| ALPHABET.contains(&b))
    })
}

pub struct CodeGenerator<R> {
    rng: R,
    initial_length: usize,
    initial_attempts: usize,
    issued: HashSet<String>,
}

impl<R: Rng> CodeGenerator<R> {
    #[must_use]
    pub fn new(rng: R, config: &CodesConfig) -> Self {
        Self {
            rng,
            initial_length: config.initial_length.max(1),
            initial_attempts: config.initial_attempts.max(1),
            issued: HashSet::new(),
        }
    }

    /// Returns a code no card in `store` carries and this generator has not
    /// handed out before.
    pub async fn next_code<S>(&mut self, store: &S) -> Result<String, StoreError>
    where
        S: CardStore + ?Sized,
    {
        let mut code_length = self.initial_length;
        let mut max_size_attempts = self.initial_attempts;

        loop {
            for _ in 0..max_size_attempts {
                let candidate = format!("{PREFIX}{}", random_code(&mut self.rng, code_length));

                if self.issued.contains(&candidate) || store.code_exists(&candidate).await? {
                    debug!("Code {} already taken", candidate);
                    continue;
                }

                self.issued.insert(candidate.clone());
                return Ok(candidate);
            }

            max_size_attempts *= 2;
            code_length += 1;
            debug!(
                "Exhausted attempts, growing code length to {} ({} attempts)",
                code_length, max_size_attempts
            );
        }
    }

    /// Number of codes handed out so far.
    #[must_use]
    pub fn issued_count(&self) -> usize {
        self.issued.len()
    }
}
