//! Global symbol registry.
//!
//! Name lookups go through sharded maps to keep lock contention low; ids are
//! handed out by a `SlotMap` so every symbol, named or dummy, gets a unique
//! key. Traversals never touch the registry: a `Symbol` carries its own name.

use std::hash::Hasher;
use std::sync::{Arc, LazyLock, Mutex, RwLock};

use rustc_hash::{FxHashMap, FxHasher};
use slotmap::{DefaultKey, SlotMap};

use super::Symbol;

const NUM_SHARDS: usize = 16;

struct RegistryShard {
    name_to_symbol: FxHashMap<Arc<str>, Symbol>,
}

struct SymbolRegistry {
    shards: [Mutex<RegistryShard>; NUM_SHARDS],
    // Key -> name, for every symbol ever created (including dummies)
    id_to_name: RwLock<SlotMap<DefaultKey, Arc<str>>>,
}

impl SymbolRegistry {
    fn new() -> Self {
        Self {
            shards: std::array::from_fn(|_| {
                Mutex::new(RegistryShard {
                    name_to_symbol: FxHashMap::default(),
                })
            }),
            id_to_name: RwLock::new(SlotMap::with_key()),
        }
    }

    fn get_shard(&self, name: &str) -> &Mutex<RegistryShard> {
        let mut hasher = FxHasher::default();
        std::hash::Hash::hash(name, &mut hasher);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "only the low bits are needed to pick a shard"
        )]
        let shard_idx = (hasher.finish() as usize) % NUM_SHARDS;
        &self.shards[shard_idx]
    }

    fn allocate(&self, name: Arc<str>) -> DefaultKey {
        self.id_to_name
            .write()
            .expect("Global ID registry poisoned")
            .insert(name)
    }
}

static REGISTRY: LazyLock<SymbolRegistry> = LazyLock::new(SymbolRegistry::new);

/// Get or create the symbol registered under `name`
///
/// # Panics
///
/// Panics if any global registry lock is poisoned.
#[must_use]
pub fn symb(name: &str) -> Symbol {
    let mut shard = REGISTRY
        .get_shard(name)
        .lock()
        .expect("Global symbol registry shard poisoned");

    if let Some(sym) = shard.name_to_symbol.get(name) {
        return sym.clone();
    }

    let name: Arc<str> = Arc::from(name);
    let key = REGISTRY.allocate(Arc::clone(&name));
    let sym = Symbol {
        key,
        name: Arc::clone(&name),
    };
    shard.name_to_symbol.insert(name, sym.clone());
    sym
}

/// Look up a symbol by name without creating it
///
/// # Panics
///
/// Panics if the global registry shard lock is poisoned.
#[must_use]
pub fn symb_get(name: &str) -> Option<Symbol> {
    REGISTRY
        .get_shard(name)
        .lock()
        .expect("Global symbol registry shard poisoned")
        .name_to_symbol
        .get(name)
        .cloned()
}

/// Create a fresh symbol that is never returned by name lookups.
///
/// Two dummies with the same name are different symbols.
#[must_use]
pub fn symb_dummy(name: &str) -> Symbol {
    let name: Arc<str> = Arc::from(name);
    Symbol {
        key: REGISTRY.allocate(Arc::clone(&name)),
        name,
    }
}

/// Number of symbols created so far, dummies included
///
/// # Panics
///
/// Panics if the global ID registry lock is poisoned.
#[must_use]
pub fn symbol_count() -> usize {
    REGISTRY
        .id_to_name
        .read()
        .expect("Global ID registry poisoned")
        .len()
}
