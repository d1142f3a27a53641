/// Domain layer: manifest, remotes, projects and the values they carry
pub mod entities;
pub mod value_objects;
