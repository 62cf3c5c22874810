mod export;
mod gps;
mod health_check;
mod helpers;
mod sentiments;
mod vlogs;
