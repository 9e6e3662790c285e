// handlers/mod.rs - Handler tiers
//
// Trigger (shared-secret bearer, invoked by the external scheduler) and
// Protected (session JWT auth, hub dashboard reads).

pub mod protected;
pub mod trigger;
