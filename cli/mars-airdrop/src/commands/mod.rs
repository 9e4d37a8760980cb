pub mod address;
pub mod build_tree;
pub mod claim;
pub mod generate_proofs;
pub mod sign;
pub mod verify;
pub mod verify_signature;
