// Domain layer - Weather value objects and pure transforms
pub mod city;
pub mod forecast;
pub mod weather;
