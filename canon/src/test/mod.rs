
mod property;
