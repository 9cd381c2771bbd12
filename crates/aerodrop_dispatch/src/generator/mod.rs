pub mod random_case;
