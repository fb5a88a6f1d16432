pub mod register_client_reqwest;
