// Copyright @yucwang 2021

pub trait ComputationNode {
    // One-line description used when logging the scene.
    fn describe(&self) -> String;
}
