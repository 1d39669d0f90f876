// handlers/protected/mod.rs - Protected handlers (operator JWT required)
//
// Security Level: JWT Authentication Required
// Route Prefix: /api/v1/moderate/*
// Middleware: jwt_auth_middleware, which injects AuthUser

pub mod moderate;
