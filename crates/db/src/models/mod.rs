pub mod recipient;
