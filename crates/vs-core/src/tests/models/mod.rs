mod envelope;
mod identity;
mod profile;
mod registration;
mod role;
