// End-to-end tests for the synthesis gateway HTTP API
//
// Each test gets its own server on an ephemeral port and its own wiremock
// instance standing in for the ElevenLabs API, so tests run in parallel
// without sharing provider state or the voice catalog cache.

mod helpers;
mod test_health;
mod test_voices;
