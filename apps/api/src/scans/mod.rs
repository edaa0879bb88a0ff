// Scan admission and match classification over HTTP.
// The score comes from the caller; this service never calls an LLM itself.

pub mod handlers;
