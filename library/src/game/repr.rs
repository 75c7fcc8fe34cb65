use nalgebra::Vector3 as NVector3;

pub type Angle = f64; // radian
pub type Distance = f64; // scene units
pub type Speed = f64; // radian per frame
pub type Vector3 = NVector3<f64>;

pub fn orbital_position(distance: Distance, angle: Angle) -> Vector3 {
    Vector3::new(distance * angle.cos(), 0., distance * angle.sin())
}
