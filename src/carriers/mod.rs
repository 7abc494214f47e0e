// Carrier adapters. Each carrier gets its own module bundling auth, wire
// translation and the rate service behind the shared ports.

pub mod ups;
