// ============================================================================
// Engine Module
// Context operations: conversion, rational reconstruction, approximate equality
// ============================================================================

mod approx;
mod convert;
mod rational;

pub use rational::limit_denominator;
