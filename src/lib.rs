//! Phone Bazaar API - backend for a second-hand phone marketplace
//!
//! This crate provides the REST API for Phone Bazaar, enabling:
//! - Listing phones for sale, with admin review before they go public
//! - Filtered search over approved listings
//! - Favorites and orders between buyers and sellers
//! - Prepaid / postpaid / DTH recharges settled through a payment gateway

pub mod auth;
pub mod config;
pub mod db;
pub mod dto;
pub mod entities;
pub mod error;
pub mod extract;
pub mod payments;
pub mod routes;
pub mod state;
pub mod storage;
pub mod utils;
