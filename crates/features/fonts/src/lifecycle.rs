//! Wiring configured fonts into the page-render lifecycle.

use crate::assets::AssetSystem;
use crate::error::FontsError;
use crate::registry::FontRegistry;
use fontloom_domain::config::FontDeclaration;
use fontloom_hooks::{EnqueueAssets, Hooks, ListenerId};
use fxhash::FxHashSet;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info};

/// A registry reachable from lifecycle listeners.
pub type SharedRegistry<A> = Arc<Mutex<FontRegistry<A>>>;

/// Wraps `registry` for sharing with hooks.
#[must_use]
pub fn shared<A>(registry: FontRegistry<A>) -> SharedRegistry<A> {
    Arc::new(Mutex::new(registry))
}

/// Enqueues every declaration each time [`EnqueueAssets`] is emitted.
///
/// Declarations are validated up front: handles must be non-empty and unique.
///
/// # Errors
/// Returns [`FontsError::InvalidDeclaration`] for an empty or duplicate handle.
pub fn boot<A>(
    registry: &SharedRegistry<A>,
    hooks: &Hooks,
    declarations: Vec<FontDeclaration>,
) -> Result<ListenerId, FontsError>
where
    A: AssetSystem + Send + 'static,
{
    validate(&declarations)?;

    let registry = Arc::clone(registry);
    let count = declarations.len();
    let id = hooks.on(move |_: &EnqueueAssets| {
        let mut registry = registry.lock();
        for font in &declarations {
            registry.enqueue(&font.handle, font.args.clone());
        }
        debug!(count = declarations.len(), "Configured fonts enqueued");
    });

    info!(fonts = count, "Font lifecycle hook installed");
    Ok(id)
}

fn validate(declarations: &[FontDeclaration]) -> Result<(), FontsError> {
    let mut seen = FxHashSet::default();
    for (index, font) in declarations.iter().enumerate() {
        if font.handle.trim().is_empty() {
            return Err(FontsError::InvalidDeclaration {
                message: "handle cannot be empty".into(),
                context: Some(format!("fonts[{index}]").into()),
            });
        }
        if !seen.insert(font.handle.as_str()) {
            return Err(FontsError::InvalidDeclaration {
                message: format!("duplicate handle '{}'", font.handle).into(),
                context: Some(format!("fonts[{index}]").into()),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::InMemoryAssets;
    use fontloom_domain::options::FontArgs;

    fn declare(handle: &str, args: FontArgs) -> FontDeclaration {
        FontDeclaration { handle: handle.to_owned(), args }
    }

    #[test]
    fn emit_enqueues_declared_fonts() {
        let registry = shared(FontRegistry::new(InMemoryAssets::default()));
        let hooks = Hooks::new();
        boot(&registry, &hooks, vec![declare("lato", FontArgs::new().family(["Lato"]))]).unwrap();

        assert!(!registry.lock().is_enqueued("lato"));
        assert_eq!(hooks.emit(&EnqueueAssets), 1);
        assert!(registry.lock().is_enqueued("lato"));

        hooks.emit(&EnqueueAssets);
        assert_eq!(registry.lock().assets().queue(), ["lato-font"]);
    }

    #[test]
    fn rejects_bad_handles() {
        let registry = shared(FontRegistry::new(InMemoryAssets::default()));
        let hooks = Hooks::new();

        let err = boot(&registry, &hooks, vec![declare(" ", FontArgs::new())]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid font declaration (fonts[0]): handle cannot be empty");

        let fonts = vec![declare("a", FontArgs::new()), declare("a", FontArgs::new())];
        let err = boot(&registry, &hooks, fonts).unwrap_err();
        assert_eq!(err.to_string(), "Invalid font declaration (fonts[1]): duplicate handle 'a'");
        assert!(!hooks.has::<EnqueueAssets>());
    }
}
