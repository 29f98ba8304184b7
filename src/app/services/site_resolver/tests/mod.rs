//! Tests for site name resolution
