// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Security Level: None
// Route Prefix: /api/v1/auth/*
// Middleware: CORS + request tracing only

pub mod auth;
