//! Tests for template engine
//!
//! Organized by pipeline stage: tokenizing, parsing, rendering, and the
//! resulting source maps.

use super::*;

// Test helper functions
mod helpers;


mod render_blocks;

// Source map tests
mod source_map;
