pub mod fetch_session;
