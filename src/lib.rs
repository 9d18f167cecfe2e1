//! Rendering core for the Jiuzhou guild site: members, attendance and
//! contribution rankings per season, in Chinese or English.

pub mod check;
pub mod coerce;
pub mod config;
pub mod context;
pub mod data;
pub mod error;
pub mod filter;
pub mod i18n;
pub mod models;
pub mod pages;
pub mod report;
pub mod roles;
pub mod scoring;
pub mod store;
pub mod view;
