pub mod env {
    pub const ENVIRONMENT_ENV_VAR: &str = "GATEHOUSE_ENVIRONMENT";
    pub const CONFIG_DIR_ENV_VAR: &str = "GATEHOUSE_CONFIG_DIR";
    pub const JWT_SECRET_ENV_VAR: &str = "GATEHOUSE_AUTH__JWT__SECRET";
    pub const DATABASE_URL_ENV_VAR: &str = "GATEHOUSE_POSTGRES__URL";
    pub const POSTMARK_AUTH_TOKEN_ENV_VAR: &str = "GATEHOUSE_EMAIL_CLIENT__AUTH_TOKEN";
}

pub mod prod {
    pub mod email_client {
        use std::time::Duration;

        pub const BASE_URL: &str = "https://api.postmarkapp.com/";
        pub const TIMEOUT: Duration = Duration::from_secs(10);
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";

    pub mod email_client {
        use std::time::Duration;

        pub const SENDER: &str = "test@email.com";
        pub const TIMEOUT: Duration = Duration::from_millis(200);
    }
}
