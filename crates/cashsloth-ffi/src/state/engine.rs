//! # Engine State
//!
//! The single engine instance shared by every export.
//!
//! ## Lifetime
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  install ──► Engine seeded with generation_floor                        │
//! │  take    ──► engine out, generation_floor = engine's next floor         │
//! │  install ──► next engine starts above every token issued so far         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Poisoning
//! Commands validate before mutating, so a panic can never leave the engine
//! half-updated; a poisoned lock is taken over instead of propagated.

use std::sync::{Mutex, MutexGuard, PoisonError};

use cashsloth_core::{CoreError, CoreResult, Engine, EngineConfig};

struct EngineState {
    engine: Option<Engine>,
    /// First handle generation the next engine may issue. `None` once spent.
    generation_floor: Option<u32>,
}

static ENGINE: Mutex<EngineState> = Mutex::new(EngineState {
    engine: None,
    generation_floor: Some(1),
});

fn lock() -> MutexGuard<'static, EngineState> {
    ENGINE.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Result of [`install`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Installed {
    /// A new engine is running with the requested config.
    Started,
    /// An engine was already running; it keeps its own config.
    AlreadyRunning { config: EngineConfig },
}

/// Installs a fresh engine unless one is already running.
///
/// ## Errors
/// `MalformedInput` for a config the engine rejects. `AllocationFailure`
/// once every handle generation has been used by earlier engines.
pub(crate) fn install(config: EngineConfig) -> CoreResult<Installed> {
    let mut state = lock();
    if let Some(engine) = &state.engine {
        return Ok(Installed::AlreadyRunning {
            config: engine.config().clone(),
        });
    }

    let floor = state
        .generation_floor
        .ok_or(CoreError::AllocationFailure { what: "cart handle" })?;
    state.engine = Some(Engine::try_from(config)?.with_generation_floor(floor));
    Ok(Installed::Started)
}

/// Removes the engine, leaving the boundary uninitialized.
pub(crate) fn take() -> Option<Engine> {
    let mut state = lock();
    let engine = state.engine.take()?;
    state.generation_floor = engine.next_generation_floor();
    Some(engine)
}

/// Executes a function with read access to the engine.
pub(crate) fn with_engine<F, R>(f: F) -> CoreResult<R>
where
    F: FnOnce(&Engine) -> CoreResult<R>,
{
    let state = lock();
    let engine = state.engine.as_ref().ok_or(CoreError::NotInitialized)?;
    f(engine)
}

/// Executes a function with write access to the engine.
pub(crate) fn with_engine_mut<F, R>(f: F) -> CoreResult<R>
where
    F: FnOnce(&mut Engine) -> CoreResult<R>,
{
    let mut state = lock();
    let engine = state.engine.as_mut().ok_or(CoreError::NotInitialized)?;
    f(engine)
}
