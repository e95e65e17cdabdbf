/*
 * This module provides the application logic layer, centered around
 * `FitBuddyAppLogic`, which turns presentation events into service calls,
 * durable-store writes, and `Store` dispatches. Form validation lives in
 * `validation`, the event and command vocabulary in `events`.
 * Unit tests for `FitBuddyAppLogic` are in `handler_tests.rs`.
 */
pub mod events;
pub mod handler;
pub mod validation;
