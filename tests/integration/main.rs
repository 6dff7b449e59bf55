//! Integration tests for the harvester
//!
//! These tests use wiremock to serve journal index, archive and detail
//! pages, and drive the full pipeline over real HTTP.

mod harvest_tests;
