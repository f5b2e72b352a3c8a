//! Scaleviz Core Types and Definitions
//!
//! This crate provides the foundational types for declaring scaleviz
//! diagrams. It includes:
//!
//! - **Identifiers**: String-interned identifiers ([`identifier::Id`])
//! - **Colors**: Validated color names ([`color::Color`])
//! - **Attributes**: Ordered Graphviz attribute maps ([`attributes::AttrMap`])
//! - **Categories**: Entity categories and their appearance ([`category`] module)
//! - **Edges**: Connection styles ([`edge`] module)
//! - **Layout**: Direction and curve style settings ([`layout`] module)
//! - **Diagram**: The declared model and its construction scope ([`diagram`] module)

pub mod attributes;
pub mod category;
pub mod color;
pub mod diagram;
pub mod edge;
pub mod identifier;
pub mod layout;
