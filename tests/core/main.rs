mod composite;
mod drag;
