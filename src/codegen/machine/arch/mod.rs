pub mod astro8;
