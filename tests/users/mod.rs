mod activate_account;
mod password_reset;
mod sign_in;
mod sign_out;
mod sign_up;
