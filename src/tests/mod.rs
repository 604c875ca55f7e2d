mod derivatives;
mod round_trip;
