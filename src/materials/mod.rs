// Copyright @yucwang 2023

pub mod diffuse_light;
pub mod lambertian_diffuse;
pub mod microfacet;
pub mod roughconductor;
